//! Runtime settings
//!
//! Defaults, optionally overridden by a JSON file and then by command-line
//! flags in the binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{FPS, MAX_CATCH_UP_TICKS, UPS};
use crate::error::{GameError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation updates per second
    pub ups: u32,
    /// Rendered frames per second
    pub fps: u32,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
    /// Name recorded in the high-score table
    pub player_name: String,
    /// High-score file; in-memory table when unset
    pub scores_path: Option<PathBuf>,
    /// Log destination; stderr when unset
    pub log_file: Option<PathBuf>,
    /// Updates allowed per loop iteration before the backlog is dropped
    pub max_catch_up_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ups: UPS,
            fps: FPS,
            seed: None,
            player_name: default_player_name(),
            scores_path: None,
            log_file: None,
            max_catch_up_ticks: MAX_CATCH_UP_TICKS,
        }
    }
}

fn default_player_name() -> String {
    std::env::var("USER")
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| "PLAYER".to_string())
}

impl Settings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| GameError::Storage {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ups == 0 {
            return Err(GameError::InvalidConfig("ups must be positive"));
        }
        if self.fps == 0 {
            return Err(GameError::InvalidConfig("fps must be positive"));
        }
        if self.max_catch_up_ticks == 0 {
            return Err(GameError::InvalidConfig("max_catch_up_ticks must be positive"));
        }
        if self.player_name.trim().is_empty() {
            return Err(GameError::InvalidConfig("player_name must not be blank"));
        }
        Ok(())
    }

    /// Render ticks the level-up banner stays up: two seconds.
    pub fn level_up_banner_frames(&self) -> u32 {
        self.fps.saturating_mul(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "ups": 120 }"#).unwrap();
        assert_eq!(s.ups, 120);
        assert_eq!(s.fps, FPS);
        assert_eq!(s.max_catch_up_ticks, MAX_CATCH_UP_TICKS);
    }

    #[test]
    fn zero_rates_rejected() {
        let s = Settings {
            fps: 0,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(GameError::InvalidConfig(_))));
    }
}

//! High score leaderboard
//!
//! Top 10 scores, either kept in memory for the process lifetime or persisted
//! to a JSON file between runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::ports::ScoreStore;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
    /// Level reached
    pub level: u32,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u64, level: u32) -> Self {
        Self {
            name: name.into(),
            score,
            level,
        }
    }
}

/// Ranked table, sorted by descending score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add an entry if it qualifies. Ties rank below existing entries.
    /// Returns the 1-based rank achieved.
    pub fn add(&mut self, entry: ScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(pos + 1)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Restore the ordering and size invariants on data read from disk.
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

// ── Stores ────────────────────────────────────────────────────────────────────

/// Volatile store; scores vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    table: HighScores,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> Result<Vec<ScoreEntry>> {
        Ok(self.table.entries.clone())
    }

    fn record_if_qualifies(&mut self, entry: ScoreEntry) -> Result<(Vec<ScoreEntry>, Option<usize>)> {
        let rank = self.table.add(entry);
        Ok((self.table.entries.clone(), rank))
    }
}

/// Table persisted as pretty-printed JSON. A missing file is an empty table.
#[derive(Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
    cached: HighScores,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: HighScores::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_err(&self, source: io::Error) -> GameError {
        GameError::Storage {
            path: self.path.clone(),
            source,
        }
    }

    fn read(&self) -> Result<HighScores> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores at {}, starting fresh", self.path.display());
                return Ok(HighScores::new());
            }
            Err(e) => return Err(self.storage_err(e)),
        };
        let mut table: HighScores = serde_json::from_str(&json)?;
        table.normalize();
        Ok(table)
    }

    fn write(&self, table: &HighScores) -> Result<()> {
        let json = serde_json::to_string_pretty(table)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.storage_err(e))?;
        }
        fs::write(&self.path, json).map_err(|e| self.storage_err(e))?;
        log::info!("High scores saved ({} entries)", table.entries.len());
        Ok(())
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&mut self) -> Result<Vec<ScoreEntry>> {
        self.cached = self.read()?;
        Ok(self.cached.entries.clone())
    }

    /// Re-reads the file so concurrent games don't clobber each other's
    /// entries. On a failed write the cached table still holds the new entry.
    fn record_if_qualifies(&mut self, entry: ScoreEntry) -> Result<(Vec<ScoreEntry>, Option<usize>)> {
        self.cached = self.read()?;
        let rank = self.cached.add(entry);
        if rank.is_some() {
            self.write(&self.cached)?;
        }
        Ok((self.cached.entries.clone(), rank))
    }
}

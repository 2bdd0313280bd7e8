//! Super Trooper - a terminal arcade shooter
//!
//! Core modules:
//! - `entities`: plain game data (player, creatures, shots, game state)
//! - `spawn`: probabilistic creature spawning
//! - `compute`: per-tick update pipeline (input, motion, level-ups)
//! - `collision`: bounds purge and collision resolution
//! - `game_loop`: fixed-timestep scheduler bridging update and render
//! - `ports`: input / output / score-store capabilities
//! - `display`, `input`: crossterm implementations of those capabilities

pub mod collision;
pub mod compute;
pub mod display;
pub mod entities;
pub mod error;
pub mod game_loop;
pub mod highscores;
pub mod input;
pub mod ports;
pub mod settings;
pub mod spawn;

pub use error::{GameError, Result};
pub use settings::Settings;

/// Screen geometry and tuning constants
pub mod consts {
    /// Play field width in terminal columns
    pub const WIDTH: f64 = 100.0;
    /// Player row; creatures below it are purged
    pub const HEIGHT: f64 = 30.0;
    /// Topmost row creatures spawn on and shots may occupy
    pub const CEILING: f64 = 2.0;

    /// Target simulation updates per second
    pub const UPS: u32 = 60;
    /// Target rendered frames per second
    pub const FPS: u32 = 30;
    /// Maximum simulation ticks run in one loop iteration
    pub const MAX_CATCH_UP_TICKS: u32 = 8;

    pub const PLAYER_START_LIFE: i32 = 3;
    pub const PLAYER_STEP: f64 = 2.0;
    pub const FIRST_LEVEL_THRESHOLD: u64 = 100;
    /// Threshold growth per level: next_level += LEVEL_SCORE_STEP * new_level
    pub const LEVEL_SCORE_STEP: u64 = 100;

    /// Rows per tick
    pub const SHOT_SPEED: f64 = 0.5;
    pub const SLOW_ENEMY_SPEED: f64 = 0.05;
    pub const SLOW_ENEMY_VALUE: u32 = 10;
    pub const SLOW_ENEMY_MULTIPLIER: f64 = 1.1;
    pub const FAST_ENEMY_SPEED: f64 = 0.1;
    pub const FAST_ENEMY_VALUE: u32 = 20;
    pub const FAST_ENEMY_MULTIPLIER: f64 = 1.2;
    pub const POWER_UP_SPEED: f64 = 0.07;
    /// Score awarded for catching a weapon boost
    pub const WEAPON_BOOST_SCORE: u64 = 10;

    /// Spawn chance per tick is level / SPAWN_LEVEL_DIVISOR, capped at 1
    pub const SPAWN_LEVEL_DIVISOR: f64 = 120.0;
    pub const EXTRA_LIFE_THRESHOLD: f64 = 0.95;
    pub const WEAPON_BOOST_THRESHOLD: f64 = 0.95;
    pub const FAST_ENEMY_THRESHOLD: f64 = 0.80;

    /// Render frames the level-up banner stays visible (2 s at FPS)
    pub const LEVEL_UP_BANNER_FRAMES: u32 = 2 * FPS;
}

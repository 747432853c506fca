//! Coin Rush - A single-screen multi-player coin collecting platformer
//!
//! Core modules:
//! - `sim`: Round simulation (physics, collisions, power-ups, spawning)
//! - `settings`: Session configuration and spawn tuning
//! - `history`: Finished rounds of the session

pub mod history;
pub mod settings;
pub mod sim;

pub use history::RoundHistory;
pub use settings::{Settings, SpawnRules};

/// Game configuration constants
pub mod consts {
    /// Fixed update rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f64 = 1.0 / TICK_RATE as f64;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player defaults (square edge before scaling)
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Added to vertical velocity every tick
    pub const GRAVITY: f32 = 0.5;
    /// Terminal fall speed (pixels per tick)
    pub const MAX_FALL_SPEED: f32 = 10.0;
    /// Horizontal speed while left/right is held (pixels per tick)
    pub const MOVE_SPEED: f32 = 5.0;
    /// Vertical velocity set by a fresh jump press
    pub const JUMP_IMPULSE: f32 = -10.0;

    /// Coin edge before scaling
    pub const COIN_SIZE: f32 = 20.0;
    /// Coin scale while CoinSize is active
    pub const COIN_SIZE_BOOST: f32 = 3.0;

    /// Power-up marker edge
    pub const POWER_UP_SIZE: f32 = 20.0;
    /// Box kept clear around a power-up when placing another one
    pub const POWER_UP_CLEARANCE: f32 = 30.0;

    /// Platform dimensions
    pub const PLATFORM_WIDTH: f32 = 100.0;
    pub const PLATFORM_HEIGHT: f32 = 10.0;
    /// Grace window after a platform spawns (seconds)
    pub const BLINK_DURATION: f64 = 2.0;
    /// Visibility toggle period while blinking (seconds)
    pub const BLINK_INTERVAL: f64 = 0.5;

    /// Lifetime of every power-up effect (seconds)
    pub const EFFECT_DURATION: f64 = 10.0;
    /// Score needed per level; also the platform spawn bucket
    pub const POINTS_PER_LEVEL: u32 = 20;

    /// Most players a session supports (one per binding set)
    pub const MAX_PLAYERS: usize = 3;
}

/// Level for a given score (1-based)
#[inline]
pub fn level_for_score(score: u32) -> u32 {
    score / consts::POINTS_PER_LEVEL + 1
}

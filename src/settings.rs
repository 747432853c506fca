//! Session settings
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PLAYERS;
use crate::sim::PowerUpKind;

/// Spawner tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRules {
    /// Coins on screen at once
    pub max_coins: usize,
    /// Seconds between successful coin spawns
    pub coin_interval: f64,
    /// Power-ups on screen at once
    pub max_power_ups: usize,
    /// Seconds between successful power-up spawns
    pub power_up_interval: f64,
    /// Placement tries per power-up spawn
    pub power_up_attempts: u32,
    /// Kinds the spawner picks from
    pub enabled_power_ups: Vec<PowerUpKind>,
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            max_coins: 10,
            coin_interval: 0.2,
            max_power_ups: 3,
            power_up_interval: 3.0,
            power_up_attempts: 10,
            enabled_power_ups: PowerUpKind::ALL.to_vec(),
        }
    }
}

impl SpawnRules {
    /// No coins or power-ups ever spawn (platforms still follow the score)
    pub fn disabled() -> Self {
        Self {
            max_coins: 0,
            max_power_ups: 0,
            ..Self::default()
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of players (1-3)
    pub players: usize,
    /// RNG seed for spawn positions and shape shifts
    pub seed: u64,
    pub spawn: SpawnRules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            players: 2,
            seed: 0,
            spawn: SpawnRules::default(),
        }
    }
}

impl Settings {
    /// Player count clamped to the supported range
    pub fn player_count(&self) -> usize {
        self.players.clamp(1, MAX_PLAYERS)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings from {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

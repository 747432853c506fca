//! Read-only view of a round for renderers and HUDs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use super::rect::Rect;
use super::state::{GameState, Platform, PowerUp, PowerUpKind, Rgb, Shape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: f32,
    pub color: Rgb,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinView {
    pub pos: Vec2,
    pub size: f32,
    pub tint: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformView {
    pub rect: Rect,
    pub visible: bool,
    pub blinking: bool,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub size: f32,
    pub kind: PowerUpKind,
    pub color: Rgb,
}

/// HUD line for a running effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectView {
    pub kind: PowerUpKind,
    pub name: String,
    /// Seconds left before the effect wears off
    pub remaining: f64,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub players: Vec<PlayerView>,
    pub coins: Vec<CoinView>,
    pub platforms: Vec<PlatformView>,
    pub power_ups: Vec<PowerUpView>,
    pub score: u32,
    pub level: u32,
    pub best_score: u32,
    pub effects: Vec<EffectView>,
}

impl GameState {
    pub fn snapshot(&self, now: f64) -> Snapshot {
        Snapshot {
            players: self
                .players
                .iter()
                .map(|p| PlayerView {
                    pos: p.pos,
                    size: p.size(),
                    color: p.color,
                    shape: p.shape,
                })
                .collect(),
            coins: self
                .coins
                .iter()
                .map(|c| CoinView {
                    pos: c.pos,
                    size: c.size(),
                    tint: c.tint,
                })
                .collect(),
            platforms: self
                .platforms
                .iter()
                .map(|p| PlatformView {
                    rect: p.rect,
                    visible: p.visible,
                    blinking: p.blinking,
                    color: Platform::COLOR,
                })
                .collect(),
            power_ups: self
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    pos: p.pos,
                    size: p.bounds().width(),
                    kind: p.kind,
                    color: PowerUp::COLOR,
                })
                .collect(),
            score: self.score,
            level: self.level,
            best_score: self.best_score,
            effects: self
                .active_effects(now)
                .into_iter()
                .map(|(kind, remaining)| EffectView {
                    kind,
                    name: kind.to_string(),
                    remaining,
                })
                .collect(),
        }
    }
}

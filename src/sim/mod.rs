//! Round simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed timestep only, clock supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (list order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod rect;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{Bounds, collides, overlaps_any};
pub use rect::Rect;
pub use snapshot::Snapshot;
pub use state::{
    ActiveEffect, ActiveEffects, Bindings, Coin, Controls, DEFAULT_BINDINGS, GameEvent, GameState, Key,
    PLAYER_COLORS, Platform, Player, PowerUp, PowerUpKind, Rgb, Shape,
};
pub use tick::{TickInput, reset, tick};

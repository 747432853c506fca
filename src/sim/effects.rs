//! Power-up effect application and expiry
//!
//! Each kind has exactly one apply and one revert arm. Coin appearance is
//! derived from the effect set, not tracked per coin.

use rand::Rng;

use super::state::{Coin, GameState, INVINCIBLE_TINT, PowerUpKind, Rgb, Shape};
use crate::consts::COIN_SIZE_BOOST;

/// Scales a ShapeShift can pick
pub const SHAPE_SHIFT_SCALES: [f32; 2] = [1.1, 0.7];

impl GameState {
    /// Immediate effect of a freshly collected power-up
    pub fn apply_effect(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Invincibility => {
                for player in &mut self.players {
                    player.color = INVINCIBLE_TINT;
                }
            }
            PowerUpKind::SwitchPlayers => self.rotate_bindings(),
            PowerUpKind::ShapeShift => {
                let shape = if self.rng.random_bool(0.5) {
                    Shape::Circle
                } else {
                    Shape::Triangle
                };
                let scale = SHAPE_SHIFT_SCALES[self.rng.random_range(0..SHAPE_SHIFT_SCALES.len())];
                for player in &mut self.players {
                    player.change_shape(shape, scale);
                    player.clamp_to_screen();
                }
            }
            PowerUpKind::DoubleScore => {
                let tint = self.coin_tint();
                for coin in &mut self.coins {
                    coin.tint = tint;
                }
            }
            PowerUpKind::CoinSize => {
                let scale = self.coin_scale();
                for coin in &mut self.coins {
                    coin.scale = scale;
                }
            }
        }
    }

    /// Undo an effect whose lifetime ran out
    pub fn revert_effect(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Invincibility => {
                for player in &mut self.players {
                    player.reset_color();
                }
            }
            PowerUpKind::SwitchPlayers => {
                for player in &mut self.players {
                    player.restore_bindings();
                }
            }
            PowerUpKind::ShapeShift => {
                for player in &mut self.players {
                    player.reset_shape();
                    player.clamp_to_screen();
                }
            }
            PowerUpKind::DoubleScore => {
                for coin in &mut self.coins {
                    coin.tint = Rgb::YELLOW;
                }
            }
            PowerUpKind::CoinSize => {
                for coin in &mut self.coins {
                    coin.scale = 1.0;
                }
            }
        }
    }

    /// Player i takes over player i-1's binding set; player 0 takes the last one's
    fn rotate_bindings(&mut self) {
        let Some(last) = self.players.last().map(|p| p.binding_slot) else {
            return;
        };
        for i in (1..self.players.len()).rev() {
            let slot = self.players[i - 1].binding_slot;
            self.players[i].rebind(slot);
        }
        self.players[0].rebind(last);
    }

    /// Tint for coins under the current effect set
    pub fn coin_tint(&self) -> Rgb {
        if self.effects.get(PowerUpKind::DoubleScore).is_some() {
            Rgb::ORANGE
        } else {
            Rgb::YELLOW
        }
    }

    /// Scale for coins under the current effect set
    pub fn coin_scale(&self) -> f32 {
        if self.effects.get(PowerUpKind::CoinSize).is_some() {
            COIN_SIZE_BOOST
        } else {
            1.0
        }
    }

    /// A coin styled for the current effect set
    pub fn styled_coin(&self, pos: glam::Vec2) -> Coin {
        Coin {
            pos,
            scale: self.coin_scale(),
            tint: self.coin_tint(),
        }
    }
}

//! Demo controller that plays the round on its own
//!
//! Each player chases the nearest coin: it steers horizontally and taps jump
//! while the coin is above it. Jump is released every other tick so the
//! edge-triggered jump keeps firing.

use super::state::GameState;
use super::tick::TickInput;

/// Horizontal dead zone around a target (pixels)
const STEER_DEADZONE: f32 = 4.0;
/// How far above the player a coin must be before jumping (pixels)
const JUMP_THRESHOLD: f32 = 30.0;

pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    let tap_phase = state.time_ticks % 2 == 0;

    for player in &state.players {
        let keys = state.bindings_for(player);
        let Some(target) = state
            .coins
            .iter()
            .map(|c| c.pos)
            .min_by(|a, b| {
                a.distance_squared(player.pos)
                    .partial_cmp(&b.distance_squared(player.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        else {
            continue;
        };

        let dx = target.x - player.pos.x;
        if dx < -STEER_DEADZONE {
            input.press(keys.left);
        } else if dx > STEER_DEADZONE {
            input.press(keys.right);
        }

        if tap_phase && player.pos.y - target.y > JUMP_THRESHOLD {
            input.press(keys.jump);
        }
    }

    input
}

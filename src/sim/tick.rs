//! Fixed timestep round update
//!
//! One call to [`tick`] advances the round by one 60 Hz step. The caller
//! supplies the clock so that timed behavior (blinking, effect lifetimes,
//! spawn intervals) is reproducible.

use std::collections::HashSet;

use super::collision::{self, Bounds};
use super::state::{GameEvent, GameState, Key, PowerUpKind};
use crate::level_for_score;

/// Keys held during a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub held: HashSet<Key>,
}

impl TickInput {
    pub fn with_keys(keys: &[Key]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
        }
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }
}

/// Advance the round by one fixed timestep
pub fn tick(state: &mut GameState, now: f64, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    state.spawn_platform_if_due(now);

    for platform in &mut state.platforms {
        platform.update(now);
    }

    for i in 0..state.players.len() {
        let controls = state.bindings_for(&state.players[i]).resolve(input);
        state.players[i].step(controls);
    }

    // Solid platforms end the round unless Invincibility is running
    if !state.effects.is_active(PowerUpKind::Invincibility, now) {
        let fatal = state.players.iter().any(|player| {
            state
                .platforms
                .iter()
                .any(|platform| platform.is_solid() && collision::collides(player, platform))
        });
        if fatal {
            reset(state, now);
            return;
        }
    }

    // Power-up pickups
    let mut collected: Vec<PowerUpKind> = Vec::new();
    for i in 0..state.players.len() {
        let bounds = state.players[i].bounds();
        for power_up in collision::take_overlapping(&bounds, &mut state.power_ups) {
            collected.push(power_up.kind);
        }
    }
    for kind in collected {
        log::debug!("Picked up {}", kind);
        state.effects.activate(kind, now);
        state.apply_effect(kind);
        state.events.push(GameEvent::PowerUpCollected(kind));
    }

    for kind in state.effects.drain_expired(now) {
        log::debug!("{} wore off", kind);
        state.revert_effect(kind);
        state.events.push(GameEvent::EffectExpired(kind));
    }

    // Coin pickups
    let points = if state.effects.is_active(PowerUpKind::DoubleScore, now) {
        2
    } else {
        1
    };
    for i in 0..state.players.len() {
        let bounds = state.players[i].bounds();
        for _ in collision::take_overlapping(&bounds, &mut state.coins) {
            state.score += points;
            state.events.push(GameEvent::CoinCollected { points });
        }
    }

    state.best_score = state.best_score.max(state.score);
    let level = level_for_score(state.score);
    if level > state.level {
        log::info!("Level {} reached (score {})", level, state.score);
        state.events.push(GameEvent::LevelUp(level));
    }
    state.level = level;

    state.spawn_power_up(now);
    state.spawn_coin(now);
}

/// Start a new round: score, effects, entities and players back to defaults
pub fn reset(state: &mut GameState, now: f64) {
    let final_score = state.score;
    log::info!(
        "Round over: score {} (level {}, best {})",
        final_score,
        state.level,
        state.best_score
    );
    state.best_score = state.best_score.max(final_score);
    state.history.record(final_score, state.level, now);

    state.score = 0;
    state.level = 1;
    state.last_platform_score = 0;
    state.effects.clear();

    for player in &mut state.players {
        player.reset_to_spawn();
    }

    state.coins.clear();
    state.power_ups.clear();
    state.platforms.clear();

    state.last_coin_spawn = now;
    state.last_power_up_spawn = now;

    state.events.push(GameEvent::RoundReset { final_score });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::{Settings, SpawnRules};
    use crate::sim::state::{Coin, INVINCIBLE_TINT, Platform, PowerUp, Shape};
    use glam::Vec2;

    /// A session with every spawner switched off so tests control the entities
    fn quiet_state(players: usize) -> GameState {
        let settings = Settings {
            players,
            seed: 12345,
            spawn: SpawnRules::disabled(),
        };
        GameState::new(&settings, 0.0)
    }

    /// Platform whose top-left puts it squarely on the given center point
    fn platform_on(pos: Vec2) -> Vec2 {
        pos - Vec2::new(PLATFORM_WIDTH / 2.0, PLATFORM_HEIGHT / 2.0)
    }

    #[test]
    fn test_coin_pickup_at_spawn() {
        let mut state = quiet_state(1);
        let spawn = state.players[0].pos;
        state.coins.push(Coin::new(spawn));

        tick(&mut state, 0.0, &TickInput::default());

        assert_eq!(state.score, 1);
        assert!(state.coins.is_empty());
        assert_eq!(state.events, vec![GameEvent::CoinCollected { points: 1 }]);
    }

    #[test]
    fn test_double_score_coin_worth_two() {
        let mut state = quiet_state(1);
        let pos = state.players[0].pos;
        state.power_ups.push(PowerUp::new(pos, PowerUpKind::DoubleScore));
        tick(&mut state, 0.0, &TickInput::default());
        assert!(state.effects.is_active(PowerUpKind::DoubleScore, 0.0));

        let pos = state.players[0].pos;
        state.coins.push(Coin::new(pos));
        tick(&mut state, 5.0, &TickInput::default());
        assert_eq!(state.score, 2);

        // Past the lifetime the bonus is gone
        let pos = state.players[0].pos;
        state.coins.push(Coin::new(pos));
        tick(&mut state, 10.5, &TickInput::default());
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_solid_platform_resets_round() {
        let mut state = quiet_state(1);
        state.score = 7;
        state.level = 1;
        let spawn = state.players[0].spawn;
        state.players[0].pos = Vec2::new(400.0, 300.0);
        let target = state.players[0].pos;
        state.platforms.push(Platform::solid(platform_on(target)));

        tick(&mut state, 1.0, &TickInput::default());

        assert_eq!(state.score, 0);
        assert_eq!(state.players[0].pos, spawn);
        assert_eq!(state.players[0].vel_y, 0.0);
        assert!(state.platforms.is_empty());
        assert_eq!(state.best_score, 7);
        assert_eq!(state.events, vec![GameEvent::RoundReset { final_score: 7 }]);
        assert_eq!(state.history.latest().map(|r| r.score), Some(7));
    }

    #[test]
    fn test_blinking_platform_is_harmless() {
        let mut state = quiet_state(1);
        state.score = 20;
        state.last_platform_score = 0;
        tick(&mut state, 0.0, &TickInput::default());
        assert_eq!(state.platforms.len(), 1);
        assert_eq!(state.events[0], GameEvent::PlatformSpawned);

        // Move the fresh platform onto the player every tick of its grace window
        let grace_ticks = (BLINK_DURATION / SIM_DT) as u32 - 2;
        for step in 1..=grace_ticks {
            let now = step as f64 * SIM_DT;
            let target = state.players[0].pos;
            state.platforms[0].rect = Platform::solid(platform_on(target)).rect;
            tick(&mut state, now, &TickInput::default());
            assert_eq!(state.score, 20, "reset at t={now}");
        }

        let target = state.players[0].pos;
        state.platforms[0].rect = Platform::solid(platform_on(target)).rect;
        tick(&mut state, BLINK_DURATION + SIM_DT, &TickInput::default());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_invincibility_survives_then_expires() {
        let mut state = quiet_state(1);
        let pos = state.players[0].pos;
        state.power_ups.push(PowerUp::new(pos, PowerUpKind::Invincibility));
        tick(&mut state, 0.0, &TickInput::default());
        assert_eq!(state.players[0].color, INVINCIBLE_TINT);

        state.score = 5;
        let target = state.players[0].pos;
        state.platforms.push(Platform::solid(platform_on(target)));
        tick(&mut state, 5.0, &TickInput::default());
        assert_eq!(state.score, 5);
        assert_eq!(state.players[0].color, INVINCIBLE_TINT);

        let target = state.players[0].pos;
        state.platforms[0] = Platform::solid(platform_on(target));
        tick(&mut state, 11.0, &TickInput::default());
        assert_eq!(state.score, 0);
        assert_eq!(state.players[0].color, state.players[0].original_color);
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_invincibility_color_resets_on_expiry() {
        let mut state = quiet_state(2);
        let pos = state.players[0].pos;
        state.power_ups.push(PowerUp::new(pos, PowerUpKind::Invincibility));
        tick(&mut state, 0.0, &TickInput::default());
        assert!(state.players.iter().all(|p| p.color == INVINCIBLE_TINT));

        tick(&mut state, 11.0, &TickInput::default());
        assert!(state.players.iter().all(|p| p.color == p.original_color));
        assert_eq!(state.events, vec![GameEvent::EffectExpired(PowerUpKind::Invincibility)]);
    }

    #[test]
    fn test_switch_players_rotates_and_restores() {
        let mut state = quiet_state(3);
        let before: Vec<usize> = state.players.iter().map(|p| p.binding_slot).collect();
        let pos = state.players[1].pos;
        state.power_ups.push(PowerUp::new(pos, PowerUpKind::SwitchPlayers));
        tick(&mut state, 0.0, &TickInput::default());

        let after: Vec<usize> = state.players.iter().map(|p| p.binding_slot).collect();
        let n = before.len();
        for i in 0..n {
            assert_eq!(after[i], before[(i + n - 1) % n]);
        }

        // Player 0 now answers to the last player's keys
        let x = state.players[0].pos.x;
        let keys = state.bindings[before[n - 1]];
        tick(&mut state, 1.0, &TickInput::with_keys(&[keys.right]));
        assert_eq!(state.players[0].pos.x, (x + MOVE_SPEED).min(SCREEN_WIDTH));

        tick(&mut state, 10.5, &TickInput::default());
        let restored: Vec<usize> = state.players.iter().map(|p| p.binding_slot).collect();
        assert_eq!(restored, before);
    }

    #[test]
    fn test_shape_shift_applies_to_everyone() {
        let mut state = quiet_state(2);
        let pos = state.players[0].pos;
        state.power_ups.push(PowerUp::new(pos, PowerUpKind::ShapeShift));
        tick(&mut state, 0.0, &TickInput::default());

        let shape = state.players[0].shape;
        let scale = state.players[0].scale;
        assert!(matches!(shape, Shape::Circle | Shape::Triangle));
        assert!(scale == 1.1 || scale == 0.7);
        assert!(state.players.iter().all(|p| p.shape == shape && p.scale == scale));

        tick(&mut state, 10.5, &TickInput::default());
        assert!(state.players.iter().all(|p| p.shape == Shape::Rectangle && p.scale == 1.0));
    }

    #[test]
    fn test_coin_effects_mirror_on_existing_coins() {
        let mut state = quiet_state(1);
        state.coins.push(Coin::new(Vec2::new(700.0, 550.0)));
        state.players[0].pos = Vec2::new(100.0, 300.0);
        let pos = state.players[0].pos;
        state.power_ups.push(PowerUp::new(pos, PowerUpKind::DoubleScore));
        state.power_ups.push(PowerUp::new(pos, PowerUpKind::CoinSize));
        tick(&mut state, 0.0, &TickInput::default());

        assert_eq!(state.coins[0].tint, crate::sim::Rgb::ORANGE);
        assert_eq!(state.coins[0].scale, COIN_SIZE_BOOST);

        state.players[0].pos = Vec2::new(100.0, 300.0);
        tick(&mut state, 10.5, &TickInput::default());
        assert_eq!(state.coins[0].tint, crate::sim::Rgb::YELLOW);
        assert_eq!(state.coins[0].scale, 1.0);
    }

    #[test]
    fn test_platform_spawns_per_score_bucket() {
        let mut state = quiet_state(1);
        state.players[0].pos = Vec2::new(400.0, 575.0);
        state.score = 19;
        tick(&mut state, 0.0, &TickInput::default());
        assert!(state.platforms.is_empty());

        state.score = 20;
        tick(&mut state, 0.1, &TickInput::default());
        assert_eq!(state.platforms.len(), 1);
        assert!(state.platforms[0].blinking);
        assert_eq!(state.level, 2);
        assert!(state.events.contains(&GameEvent::LevelUp(2)));

        // Same bucket: no second platform
        state.score = 39;
        state.platforms.clear();
        tick(&mut state, 0.2, &TickInput::default());
        assert!(state.platforms.is_empty());
    }

    #[test]
    fn test_best_score_survives_reset() {
        let mut state = quiet_state(1);
        state.score = 12;
        tick(&mut state, 0.0, &TickInput::default());
        assert_eq!(state.best_score, 12);

        reset(&mut state, 1.0);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.best_score, 12);
    }

    #[test]
    fn test_reset_clears_running_effects() {
        let mut state = quiet_state(3);
        let pos = state.players[0].pos;
        for kind in [PowerUpKind::SwitchPlayers, PowerUpKind::ShapeShift, PowerUpKind::Invincibility] {
            state.power_ups.push(PowerUp::new(pos, kind));
        }
        tick(&mut state, 0.5, &TickInput::default());
        assert_eq!(state.effects.len(), 3);
        assert_ne!(state.players[0].binding_slot, 0);
        assert_ne!(state.players[0].shape, Shape::Rectangle);

        state.coins.push(Coin::new(Vec2::new(10.0, 590.0)));
        state.power_ups.push(PowerUp::new(Vec2::new(30.0, 590.0), PowerUpKind::CoinSize));
        reset(&mut state, 1.0);

        for (i, player) in state.players.iter().enumerate() {
            assert_eq!(player.binding_slot, i);
            assert_eq!(player.shape, Shape::Rectangle);
            assert_eq!(player.scale, 1.0);
            assert_eq!(player.color, player.original_color);
            assert_eq!(player.pos, player.spawn);
        }
        assert!(state.coins.is_empty());
        assert!(state.power_ups.is_empty());
        assert!(state.effects.is_empty());

        // Nothing left to expire later
        tick(&mut state, 20.0, &TickInput::default());
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::EffectExpired(_))));
    }

    #[test]
    fn test_reset_restores_timers() {
        let mut state = quiet_state(1);
        reset(&mut state, 42.0);
        assert_eq!(state.last_coin_spawn, 42.0);
        assert_eq!(state.last_power_up_spawn, 42.0);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings {
            players: 2,
            seed: 99999,
            ..Default::default()
        };
        let mut state1 = GameState::new(&settings, 0.0);
        let mut state2 = GameState::new(&settings, 0.0);

        let inputs = [
            TickInput::with_keys(&[Key::Right]),
            TickInput::with_keys(&[Key::Up, Key::A]),
            TickInput::default(),
            TickInput::with_keys(&[Key::W]),
        ];

        for step in 0..600 {
            let now = step as f64 * SIM_DT;
            let input = &inputs[step % inputs.len()];
            tick(&mut state1, now, input);
            tick(&mut state2, now, input);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.coins, state2.coins);
        assert_eq!(state1.power_ups, state2.power_ups);
        assert_eq!(state1.players[1].pos, state2.players[1].pos);
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        let mut state = quiet_state(1);
        let before = state.players[0].pos.x;
        // Player 2's keys do nothing in a single-player session
        tick(&mut state, 0.0, &TickInput::with_keys(&[Key::J, Key::L]));
        assert_eq!(state.players[0].pos.x, before);
    }
}

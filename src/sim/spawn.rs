//! Randomized entity spawning
//!
//! Placement is a plain rejection test against existing entities. A failed
//! placement is skipped, never forced; the next tick tries again.

use glam::Vec2;
use rand::Rng;

use super::collision::{self, Bounds};
use super::rect::Rect;
use super::state::{GameEvent, GameState, Platform, PowerUp};
use crate::consts::*;

impl GameState {
    /// Spawn one blinking platform each time the score enters a new bucket
    pub fn spawn_platform_if_due(&mut self, now: f64) {
        if self.score / POINTS_PER_LEVEL <= self.last_platform_score / POINTS_PER_LEVEL {
            return;
        }
        let top_left = Vec2::new(
            self.rng.random_range(0.0..=SCREEN_WIDTH - PLATFORM_WIDTH),
            self.rng.random_range(0.0..=SCREEN_HEIGHT - PLATFORM_HEIGHT),
        );
        self.platforms.push(Platform::spawn(top_left, now));
        self.last_platform_score = self.score;
        self.events.push(GameEvent::PlatformSpawned);
        log::info!(
            "Platform spawned at ({:.0}, {:.0}), {} on screen",
            top_left.x,
            top_left.y,
            self.platforms.len()
        );
    }

    /// Try to place a coin. Single attempt; skipped if it lands on a platform.
    /// Returns true if a coin was added.
    pub fn spawn_coin(&mut self, now: f64) -> bool {
        if now - self.last_coin_spawn <= self.rules.coin_interval || self.coins.len() >= self.rules.max_coins {
            return false;
        }
        let pos = self.random_point();
        let coin = self.styled_coin(pos);
        if collision::overlaps_any(&coin.bounds(), &self.platforms) {
            return false;
        }
        self.coins.push(coin);
        self.last_coin_spawn = now;
        true
    }

    /// Try to place a power-up of a random enabled kind away from the others.
    /// Returns true if a power-up was added.
    pub fn spawn_power_up(&mut self, now: f64) -> bool {
        if now - self.last_power_up_spawn <= self.rules.power_up_interval
            || self.power_ups.len() >= self.rules.max_power_ups
            || self.rules.enabled_power_ups.is_empty()
        {
            return false;
        }

        for _ in 0..self.rules.power_up_attempts {
            let pos = self.random_point();
            let clearance = Rect::from_center(pos, Vec2::splat(POWER_UP_CLEARANCE));
            if collision::overlaps_any(&clearance, &self.power_ups) {
                continue;
            }
            let index = self.rng.random_range(0..self.rules.enabled_power_ups.len());
            let kind = self.rules.enabled_power_ups[index];
            log::debug!("{} spawned at ({:.0}, {:.0})", kind, pos.x, pos.y);
            self.power_ups.push(PowerUp::new(pos, kind));
            self.last_power_up_spawn = now;
            return true;
        }
        false
    }

    fn random_point(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.random_range(0.0..=SCREEN_WIDTH),
            self.rng.random_range(0.0..=SCREEN_HEIGHT),
        )
    }
}

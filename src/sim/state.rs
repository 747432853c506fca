//! Round state and entity types
//!
//! Everything the round controller owns lives here. Positions are in screen
//! pixels; timestamps are seconds supplied by the caller's clock.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use super::rect::Rect;
use super::tick::TickInput;
use crate::consts::*;
use crate::history::RoundHistory;
use crate::settings::{Settings, SpawnRules};

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLUE: Rgb = Rgb(100, 120, 155);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const VIOLET: Rgb = Rgb(128, 0, 128);
}

/// Player colors, in player order
pub const PLAYER_COLORS: [Rgb; MAX_PLAYERS] = [Rgb::RED, Rgb::BLUE, Rgb::GRAY];

/// Tint applied to every player while Invincibility is active
pub const INVINCIBLE_TINT: Rgb = Rgb::WHITE;

/// Outline a player is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shape {
    #[default]
    Rectangle,
    Circle,
    Triangle,
}

/// Physical keys the round listens to. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    A,
    D,
    W,
    J,
    L,
    I,
}

/// The three logical controls of a player mapped to physical keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    pub left: Key,
    pub right: Key,
    pub jump: Key,
}

/// Default binding sets, in player order
pub const DEFAULT_BINDINGS: [Bindings; MAX_PLAYERS] = [
    Bindings {
        left: Key::Left,
        right: Key::Right,
        jump: Key::Up,
    },
    Bindings {
        left: Key::A,
        right: Key::D,
        jump: Key::W,
    },
    Bindings {
        left: Key::J,
        right: Key::L,
        jump: Key::I,
    },
];

impl Bindings {
    /// Logical control state for this binding set under the given input
    pub fn resolve(&self, input: &TickInput) -> Controls {
        Controls {
            left: input.is_held(self.left),
            right: input.is_held(self.right),
            jump: input.is_held(self.jump),
        }
    }
}

/// Logical controls, either held this tick or held last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// A player-controlled square (or circle/triangle while shape-shifted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    /// Vertical velocity (pixels per tick, positive is down)
    pub vel_y: f32,
    /// Where the player returns on round reset
    pub spawn: Vec2,
    /// Index into the round's binding sets currently driving this player
    pub binding_slot: usize,
    /// Binding set owned by this player outside of SwitchPlayers
    pub home_slot: usize,
    pub original_color: Rgb,
    pub color: Rgb,
    pub shape: Shape,
    pub scale: f32,
    /// Controls as seen on the previous tick (for edge-triggered jump)
    pub held: Controls,
}

impl Player {
    pub fn new(spawn: Vec2, slot: usize, color: Rgb) -> Self {
        Self {
            pos: spawn,
            vel_y: 0.0,
            spawn,
            binding_slot: slot,
            home_slot: slot,
            original_color: color,
            color,
            shape: Shape::Rectangle,
            scale: 1.0,
            held: Controls::default(),
        }
    }

    /// Current edge length
    #[inline]
    pub fn size(&self) -> f32 {
        PLAYER_SIZE * self.scale
    }

    /// Advance one tick: gravity, horizontal movement, jump, screen clamp
    pub fn step(&mut self, controls: Controls) {
        self.vel_y = (self.vel_y + GRAVITY).min(MAX_FALL_SPEED);
        self.pos.y += self.vel_y;

        if controls.left {
            self.pos.x -= MOVE_SPEED;
        }
        if controls.right {
            self.pos.x += MOVE_SPEED;
        }

        if controls.jump && !self.held.jump {
            self.vel_y = JUMP_IMPULSE;
        }
        self.held = controls;

        self.clamp_to_screen();
    }

    /// Keep the player on screen. Half the body may hang over the side edges.
    pub fn clamp_to_screen(&mut self) {
        let half = self.size() / 2.0;
        self.pos.x = self.pos.x.clamp(0.0, SCREEN_WIDTH);
        self.pos.y = self.pos.y.clamp(half, (SCREEN_HEIGHT - half).max(half));
    }

    /// Drive this player from another binding set
    pub fn rebind(&mut self, slot: usize) {
        self.binding_slot = slot;
        self.held = Controls::default();
    }

    pub fn restore_bindings(&mut self) {
        self.rebind(self.home_slot);
    }

    pub fn reset_color(&mut self) {
        self.color = self.original_color;
    }

    pub fn change_shape(&mut self, shape: Shape, scale: f32) {
        self.shape = shape;
        self.scale = scale;
    }

    pub fn reset_shape(&mut self) {
        self.change_shape(Shape::Rectangle, 1.0);
    }

    /// Return to spawn with default look and controls
    pub fn reset_to_spawn(&mut self) {
        self.pos = self.spawn;
        self.vel_y = 0.0;
        self.reset_color();
        self.reset_shape();
        self.restore_bindings();
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.size()))
    }
}

/// A coin worth one point (two while DoubleScore is active)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Center position
    pub pos: Vec2,
    pub scale: f32,
    pub tint: Rgb,
}

impl Coin {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            scale: 1.0,
            tint: Rgb::YELLOW,
        }
    }

    #[inline]
    pub fn size(&self) -> f32 {
        COIN_SIZE * self.scale
    }
}

impl Bounds for Coin {
    fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.size()))
    }
}

/// A hazard platform. Fatal to touch once it stops blinking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    /// Still inside the spawn grace window
    pub blinking: bool,
    pub visible: bool,
    pub spawned_at: f64,
    last_toggle: f64,
}

impl Platform {
    pub const COLOR: Rgb = Rgb::GREEN;

    /// A freshly spawned platform, blinking from `now`
    pub fn spawn(top_left: Vec2, now: f64) -> Self {
        Self {
            rect: Rect::from_top_left(top_left, Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT)),
            blinking: true,
            visible: true,
            spawned_at: now,
            last_toggle: now,
        }
    }

    /// A platform that is already solid
    pub fn solid(top_left: Vec2) -> Self {
        Self {
            rect: Rect::from_top_left(top_left, Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT)),
            blinking: false,
            visible: true,
            spawned_at: 0.0,
            last_toggle: 0.0,
        }
    }

    /// Advance the blink animation; settles visible once the grace window ends
    pub fn update(&mut self, now: f64) {
        if !self.blinking {
            self.visible = true;
            return;
        }
        if now - self.spawned_at >= BLINK_DURATION {
            self.blinking = false;
            self.visible = true;
        } else if now - self.last_toggle >= BLINK_INTERVAL {
            self.visible = !self.visible;
            self.last_toggle = now;
        }
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        !self.blinking
    }
}

impl Bounds for Platform {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    DoubleScore,
    Invincibility,
    SwitchPlayers,
    ShapeShift,
    CoinSize,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::DoubleScore,
        PowerUpKind::Invincibility,
        PowerUpKind::SwitchPlayers,
        PowerUpKind::ShapeShift,
        PowerUpKind::CoinSize,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::DoubleScore => "Double Score",
            PowerUpKind::Invincibility => "Invincibility",
            PowerUpKind::SwitchPlayers => "Switch Players",
            PowerUpKind::ShapeShift => "Shape Shift",
            PowerUpKind::CoinSize => "Coin Size",
        }
    }
}

impl fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A power-up waiting to be picked up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    /// Center position
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub const COLOR: Rgb = Rgb::VIOLET;

    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self { pos, kind }
    }
}

impl Bounds for PowerUp {
    fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(POWER_UP_SIZE))
    }
}

/// One running power-up effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub activated_at: f64,
}

impl ActiveEffect {
    #[inline]
    pub fn age(&self, now: f64) -> f64 {
        now - self.activated_at
    }

    /// Still in effect (age <= EFFECT_DURATION)
    #[inline]
    pub fn is_live(&self, now: f64) -> bool {
        self.age(now) <= EFFECT_DURATION
    }

    pub fn remaining(&self, now: f64) -> f64 {
        (EFFECT_DURATION - self.age(now)).max(0.0)
    }
}

/// Concurrently active effects, one entry per kind, in activation order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    entries: Vec<ActiveEffect>,
}

impl ActiveEffects {
    /// Start (or restart) an effect at `now`. A restarted effect keeps its slot.
    pub fn activate(&mut self, kind: PowerUpKind, now: f64) {
        match self.entries.iter_mut().find(|e| e.kind == kind) {
            Some(entry) => entry.activated_at = now,
            None => self.entries.push(ActiveEffect {
                kind,
                activated_at: now,
            }),
        }
    }

    /// Whether `kind` is present and not yet past its lifetime
    pub fn is_active(&self, kind: PowerUpKind, now: f64) -> bool {
        self.get(kind).is_some_and(|e| e.is_live(now))
    }

    pub fn get(&self, kind: PowerUpKind) -> Option<&ActiveEffect> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Remove and return effects older than their lifetime, in activation order
    pub fn drain_expired(&mut self, now: f64) -> Vec<PowerUpKind> {
        let expired: Vec<PowerUpKind> = self
            .entries
            .iter()
            .filter(|e| !e.is_live(now))
            .map(|e| e.kind)
            .collect();
        self.entries.retain(|e| e.is_live(now));
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { points: u32 },
    PowerUpCollected(PowerUpKind),
    EffectExpired(PowerUpKind),
    PlatformSpawned,
    LevelUp(u32),
    RoundReset { final_score: u32 },
}

/// Complete round controller state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: Pcg32,
    pub rules: SpawnRules,
    /// Shared, ordered binding sets; players index into this
    pub bindings: Vec<Bindings>,
    pub players: Vec<Player>,
    pub coins: Vec<Coin>,
    pub platforms: Vec<Platform>,
    pub power_ups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    pub score: u32,
    /// Best score seen this session (survives resets)
    pub best_score: u32,
    pub level: u32,
    /// Score at which the last platform spawned
    pub last_platform_score: u32,
    pub last_coin_spawn: f64,
    pub last_power_up_spawn: f64,
    /// Ticks simulated this session
    pub time_ticks: u64,
    /// Finished rounds
    pub history: RoundHistory,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session from settings, with spawn timers starting at `now`
    pub fn new(settings: &Settings, now: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let count = settings.player_count();
        let bindings = DEFAULT_BINDINGS[..count].to_vec();
        let players = (0..count)
            .map(|slot| {
                let spawn = Vec2::new(SCREEN_WIDTH / rng.random_range(1..=8u32) as f32, SCREEN_HEIGHT / 3.0);
                let mut player = Player::new(spawn, slot, PLAYER_COLORS[slot]);
                player.clamp_to_screen();
                player.spawn = player.pos;
                player
            })
            .collect();

        Self {
            rng,
            rules: settings.spawn.clone(),
            bindings,
            players,
            coins: Vec::new(),
            platforms: Vec::new(),
            power_ups: Vec::new(),
            effects: ActiveEffects::default(),
            score: 0,
            best_score: 0,
            level: 1,
            last_platform_score: 0,
            last_coin_spawn: now,
            last_power_up_spawn: now,
            time_ticks: 0,
            history: RoundHistory::default(),
            events: Vec::new(),
        }
    }

    /// Binding set currently driving a player
    pub fn bindings_for(&self, player: &Player) -> Bindings {
        self.bindings[player.binding_slot % self.bindings.len()]
    }

    /// Running effects with seconds left, in activation order
    pub fn active_effects(&self, now: f64) -> Vec<(PowerUpKind, f64)> {
        self.effects
            .iter()
            .filter(|e| e.is_live(now))
            .map(|e| (e.kind, e.remaining(now)))
            .collect()
    }
}

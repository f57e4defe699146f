//! Tilt Arcade - tilt-controlled mini-game core
//!
//! Core modules:
//! - `sim`: Deterministic round logic (motion, collisions, clock, session phases)
//! - `platform`: Periodic channel boundary (sensor stream, timers) and a virtual-time host
//! - `settings`: Validated, data-driven tuning values

pub mod platform;
pub mod settings;
pub mod sim;

pub use platform::{Channel, Platform, PlatformError, Subscription, VirtualPlatform};
pub use settings::{ConfigError, Settings};
pub use sim::{GameVariant, Phase, Session, SessionEvent, Snapshot};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Tilt multiplier (pixels per unit of orientation delta)
    pub const SENSITIVITY: f32 = 10.0;
    /// Motion sampling period (~60 Hz)
    pub const SAMPLE_PERIOD_MS: u32 = 16;
    /// Sampling must stay strictly below this for smooth motion
    pub const MAX_SAMPLE_PERIOD_MS: u32 = 20;
    /// Round clock period
    pub const CLOCK_PERIOD_MS: u32 = 1000;
    /// Round duration for timed variants
    pub const ROUND_SECONDS: u32 = 30;

    /// Orb collector entity sizes
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const ORB_SIZE: f32 = 30.0;

    /// Space runner entity sizes
    pub const ROCKET_SIZE: f32 = 110.0;
    pub const ASTEROID_SIZE: f32 = 50.0;
    /// Gap between the rocket and the bottom edge
    pub const RUNNER_BOTTOM_MARGIN: f32 = 50.0;

    /// Asteroid field advance (pixels per spawner tick)
    pub const ASTEROID_STEP: f32 = 5.0;
    pub const SPAWNER_PERIOD_MS: u32 = 50;
    /// Chance of a new asteroid per spawner tick
    pub const SPAWN_CHANCE: f64 = 0.03;
}

/// Screen bounds supplied by the host, constant for a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest top-left anchor that keeps a square of `size` fully inside
    #[inline]
    pub fn max_anchor(&self, size: f32) -> Vec2 {
        Vec2::new(
            (self.width - size).max(0.0),
            (self.height - size).max(0.0),
        )
    }
}

/// Center of a square entity anchored at its top-left corner
#[inline]
pub fn center_of(pos: Vec2, size: f32) -> Vec2 {
    pos + Vec2::splat(size / 2.0)
}

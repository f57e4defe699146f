//! Round state and core simulation types
//!
//! Everything that changes during a round lives in one [`RoundState`] owned by
//! the session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::RoundClock;
use super::controller::AxisLock;
use super::motion::MotionSampler;
use crate::center_of;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen, waiting for the player to start
    #[default]
    Start,
    /// Active round: sampling, movement, collisions and clock all live
    Playing,
    /// Round ended; final score on display
    GameOver,
}

/// Which mini-game the session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameVariant {
    /// Collect orbs with no time limit
    OrbFreePlay,
    /// Collect as many orbs as possible before the clock runs out
    #[default]
    OrbCollector,
    /// Dodge falling asteroids; one hit ends the run
    SpaceRunner,
}

impl GameVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameVariant::OrbFreePlay => "orb-free-play",
            GameVariant::OrbCollector => "orb-collector",
            GameVariant::SpaceRunner => "space-runner",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "orb-free-play" | "free-play" | "free" => Some(GameVariant::OrbFreePlay),
            "orb-collector" | "orb" | "collector" => Some(GameVariant::OrbCollector),
            "space-runner" | "runner" => Some(GameVariant::SpaceRunner),
            _ => None,
        }
    }

    /// Whether rounds are bounded by the countdown
    pub fn is_timed(&self) -> bool {
        !matches!(self, GameVariant::OrbFreePlay)
    }

    /// Whether touching a target ends the round
    pub fn fatal_collisions(&self) -> bool {
        matches!(self, GameVariant::SpaceRunner)
    }

    /// Whether targets move on the spawner ticker
    pub fn has_spawner(&self) -> bool {
        matches!(self, GameVariant::SpaceRunner)
    }

    pub fn axis_lock(&self) -> AxisLock {
        match self {
            GameVariant::SpaceRunner => AxisLock::TrackY,
            _ => AxisLock::Free,
        }
    }

    pub fn player_size(&self, settings: &Settings) -> f32 {
        match self {
            GameVariant::SpaceRunner => settings.rocket_size,
            _ => settings.player_size,
        }
    }

    pub fn target_size(&self, settings: &Settings) -> f32 {
        match self {
            GameVariant::SpaceRunner => settings.asteroid_size,
            _ => settings.orb_size,
        }
    }
}

/// A square sprite drawn as a circle, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    /// Diameter
    pub size: f32,
}

impl Entity {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        center_of(self.pos, self.size)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// Mutable per-round bundle
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Generation counter; bumped on every round start
    pub round: u64,
    pub player: Entity,
    /// Orbs or asteroids, in spawn order
    pub targets: Vec<Entity>,
    pub score: u32,
    pub clock: RoundClock,
    pub sampler: MotionSampler,
}

impl RoundState {
    /// Empty bundle shown on the title screen
    pub fn idle(round: u64, player_size: f32, round_seconds: u32) -> Self {
        Self {
            round,
            player: Entity::new(Vec2::ZERO, player_size),
            targets: Vec::new(),
            score: 0,
            clock: RoundClock::idle(round_seconds),
            sampler: MotionSampler::new(),
        }
    }
}

//! Game settings and tuning
//!
//! Loaded from JSON (every field optional) and validated against the screen
//! bounds before a session is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::consts::*;

/// Settings loading/validation errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values that would break the game loop
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Tunable values for every variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Motion ===
    /// Tilt multiplier (pixels per unit of orientation delta)
    pub sensitivity: f32,
    /// Orientation sampling period
    pub sample_period_ms: u32,

    // === Round ===
    pub clock_period_ms: u32,
    pub round_seconds: u32,

    // === Orb collector ===
    pub player_size: f32,
    pub orb_size: f32,
    /// Orbs on screen at once
    pub orb_count: usize,

    // === Space runner ===
    pub rocket_size: f32,
    pub asteroid_size: f32,
    pub asteroid_step: f32,
    pub spawner_period_ms: u32,
    /// Probability of a new asteroid per spawner tick
    pub spawn_chance: f64,
    pub runner_bottom_margin: f32,

    /// RNG seed (None = derive from entropy)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sensitivity: SENSITIVITY,
            sample_period_ms: SAMPLE_PERIOD_MS,

            clock_period_ms: CLOCK_PERIOD_MS,
            round_seconds: ROUND_SECONDS,

            player_size: PLAYER_SIZE,
            orb_size: ORB_SIZE,
            orb_count: 1,

            rocket_size: ROCKET_SIZE,
            asteroid_size: ASTEROID_SIZE,
            asteroid_step: ASTEROID_STEP,
            spawner_period_ms: SPAWNER_PERIOD_MS,
            spawn_chance: SPAWN_CHANCE,
            runner_bottom_margin: RUNNER_BOTTOM_MARGIN,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject configurations that produce sluggish, inverted or off-screen play
    pub fn validate(&self, bounds: &Bounds) -> Result<(), ConfigError> {
        if !self.sensitivity.is_finite() || self.sensitivity < SENSITIVITY {
            return Err(ConfigError::Invalid(format!(
                "sensitivity {} must be a finite value >= {}",
                self.sensitivity, SENSITIVITY
            )));
        }
        if self.sample_period_ms == 0 || self.sample_period_ms >= MAX_SAMPLE_PERIOD_MS {
            return Err(ConfigError::Invalid(format!(
                "sample period {}ms must be in 1..{}ms",
                self.sample_period_ms, MAX_SAMPLE_PERIOD_MS
            )));
        }
        if self.clock_period_ms == 0 || self.spawner_period_ms == 0 {
            return Err(ConfigError::Invalid("timer periods must be non-zero".into()));
        }
        if self.round_seconds == 0 {
            return Err(ConfigError::Invalid("round must last at least one second".into()));
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(ConfigError::Invalid(format!(
                "spawn chance {} must be within 0..=1",
                self.spawn_chance
            )));
        }
        if !self.asteroid_step.is_finite() || self.asteroid_step <= 0.0 {
            return Err(ConfigError::Invalid("asteroid step must be positive".into()));
        }
        if self.orb_count == 0 {
            return Err(ConfigError::Invalid("at least one orb is required".into()));
        }
        if !(bounds.width.is_finite() && bounds.height.is_finite()) {
            return Err(ConfigError::Invalid("bounds must be finite".into()));
        }

        let sizes = [
            ("player", self.player_size),
            ("orb", self.orb_size),
            ("rocket", self.rocket_size),
            ("asteroid", self.asteroid_size),
        ];
        for (name, size) in sizes {
            if !size.is_finite() || size <= 0.0 || size > bounds.width || size > bounds.height {
                return Err(ConfigError::Invalid(format!(
                    "{name} size {size} does not fit {}x{}",
                    bounds.width, bounds.height
                )));
            }
        }
        if self.rocket_size + self.runner_bottom_margin > bounds.height {
            return Err(ConfigError::Invalid(format!(
                "rocket track ({} + {}) is below the screen",
                self.rocket_size, self.runner_bottom_margin
            )));
        }

        Ok(())
    }
}

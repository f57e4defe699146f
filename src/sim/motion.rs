//! Motion sampling
//!
//! Holds the most recent orientation reading. There is no queue: a new sample
//! always replaces the previous one.

use serde::{Deserialize, Serialize};

/// Raw 3-axis orientation delta as pushed by the sensor
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientationSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl OrientationSample {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Latest-sample register
#[derive(Debug, Clone, Default)]
pub struct MotionSampler {
    latest: Option<OrientationSample>,
    received: u64,
}

impl MotionSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a sample verbatim, overwriting the previous one
    pub fn record(&mut self, sample: OrientationSample) -> OrientationSample {
        self.latest = Some(sample);
        self.received += 1;
        sample
    }

    pub fn latest(&self) -> Option<OrientationSample> {
        self.latest
    }

    /// Samples accepted since the last reset
    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Round countdown

use serde::{Deserialize, Serialize};

/// Outcome of delivering one clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Still counting; seconds left after this tick
    Running(u32),
    /// Reached zero on this tick; the clock has stopped itself
    Expired,
    /// Tick arrived after the clock stopped; nothing changed
    Stopped,
}

/// Whole-second countdown that stops itself at zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundClock {
    remaining: u32,
    running: bool,
}

impl RoundClock {
    /// Armed clock with `seconds` on it
    pub fn start(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            running: true,
        }
    }

    /// Clock that never runs (untimed variants)
    pub fn idle(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            running: false,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one period
    pub fn tick(&mut self) -> ClockTick {
        if !self.running {
            return ClockTick::Stopped;
        }
        if self.remaining <= 1 {
            self.remaining = 0;
            self.running = false;
            return ClockTick::Expired;
        }
        self.remaining -= 1;
        ClockTick::Running(self.remaining)
    }

    /// Freeze at the current value. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.running = false;
    }
}

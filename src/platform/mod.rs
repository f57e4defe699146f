//! Platform abstraction layer
//!
//! The simulation never owns a sensor or a timer. It asks the host to start
//! and stop periodic channels and the host pushes deliveries back, tagged with
//! the [`Subscription`] they were issued for:
//! - Motion samples (orientation sensor)
//! - Round clock ticks
//! - Obstacle spawner ticks

pub mod virtual_clock;

pub use virtual_clock::{Delivery, VirtualPlatform};

use serde::{Deserialize, Serialize};

/// A periodic event source the session can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    /// 3-axis orientation stream
    Motion,
    /// Asteroid field advance/spawn ticker
    Spawner,
    /// One-second countdown
    RoundClock,
}

/// Token identifying one subscription of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscription {
    pub round: u64,
    pub channel: Channel,
}

impl Subscription {
    pub fn new(round: u64, channel: Channel) -> Self {
        Self { round, channel }
    }
}

/// Errors reported by the host when a channel cannot be started
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The backing source (e.g. gyroscope) is missing or denied
    #[error("{0:?} source unavailable")]
    Unavailable(Channel),
}

/// Host-side periodic channels
pub trait Platform {
    /// Start delivering `sub` every `period_ms`
    fn subscribe(&mut self, sub: Subscription, period_ms: u32) -> Result<(), PlatformError>;

    /// Stop delivering `sub`. Unknown or already-stopped tokens are ignored.
    fn unsubscribe(&mut self, sub: Subscription);
}

impl<P: Platform + ?Sized> Platform for &mut P {
    fn subscribe(&mut self, sub: Subscription, period_ms: u32) -> Result<(), PlatformError> {
        (**self).subscribe(sub, period_ms)
    }

    fn unsubscribe(&mut self, sub: Subscription) {
        (**self).unsubscribe(sub)
    }
}

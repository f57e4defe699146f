//! Deterministic round simulation
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (targets in spawn order)
//! - No rendering, sensor or timer ownership (see `platform`)

pub mod clock;
pub mod collision;
pub mod controller;
pub mod motion;
pub mod session;
pub mod spawn;
pub mod state;

pub use clock::{ClockTick, RoundClock};
pub use collision::{any_hit, circles_overlap, entities_overlap, hits};
pub use controller::{AxisLock, apply_tilt};
pub use motion::{MotionSampler, OrientationSample};
pub use session::{Session, SessionEvent, Snapshot};
pub use spawn::{advance_asteroids, random_anchor, spawn_asteroid, spawn_orb};
pub use state::{Entity, GameVariant, Phase, RoundState};

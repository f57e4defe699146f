//! Session state machine
//!
//! `Start --start_round--> Playing --(clock expiry | fatal hit)--> GameOver
//! --acknowledge--> Start`. The session owns the round bundle and every
//! periodic subscription; handlers for sensor samples and timer ticks only act
//! while `Playing` and only for the subscriptions of the current round.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{ClockTick, RoundClock};
use super::collision;
use super::controller::apply_tilt;
use super::motion::{MotionSampler, OrientationSample};
use super::spawn::{advance_asteroids, spawn_asteroid, spawn_orb};
use super::state::{Entity, GameVariant, Phase, RoundState};
use crate::Bounds;
use crate::platform::{Channel, Platform, Subscription, VirtualPlatform};
use crate::settings::{ConfigError, Settings};

/// Notable things that happened, queued for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    RoundStarted { round: u64 },
    /// An orb was picked up; carries the new score
    OrbCollected { score: u32 },
    /// Runner touched an asteroid
    ObstacleHit,
    TimeExpired,
    ReturnedToStart,
}

/// Read-only view handed to the presentation layer each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub variant: GameVariant,
    pub phase: Phase,
    pub player: Vec2,
    pub targets: Vec<Vec2>,
    pub score: u32,
    pub time_left: u32,
}

/// What moved before a collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    PlayerMoved,
    TargetsMoved,
    /// Obstacle ticker advanced the field (the runner's survival tick)
    SpawnerTick,
}

/// One game session on one screen
pub struct Session<P: Platform> {
    variant: GameVariant,
    settings: Settings,
    bounds: Bounds,
    platform: P,
    rng: Pcg32,
    phase: Phase,
    round: RoundState,
    /// Live subscriptions of the current round
    leases: Vec<Subscription>,
    events: Vec<SessionEvent>,
}

impl<P: Platform> Session<P> {
    /// Build a session on the title screen
    pub fn new(
        variant: GameVariant,
        settings: Settings,
        bounds: Bounds,
        platform: P,
    ) -> Result<Self, ConfigError> {
        settings.validate(&bounds)?;

        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!(
            "{} session on {}x{} (seed {})",
            variant.as_str(),
            bounds.width,
            bounds.height,
            seed
        );

        let round = RoundState::idle(
            0,
            variant.player_size(&settings),
            settings.round_seconds,
        );
        Ok(Self {
            variant,
            settings,
            bounds,
            platform,
            rng: Pcg32::seed_from_u64(seed),
            phase: Phase::Start,
            round,
            leases: Vec::new(),
            events: Vec::new(),
        })
    }

    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    pub fn time_left(&self) -> u32 {
        self.round.clock.remaining()
    }

    /// Current round id (0 before the first round)
    pub fn round_id(&self) -> u64 {
        self.round.round
    }

    pub fn player(&self) -> &Entity {
        &self.round.player
    }

    pub fn targets(&self) -> &[Entity] {
        &self.round.targets
    }

    pub fn clock(&self) -> &RoundClock {
        &self.round.clock
    }

    pub fn sampler(&self) -> &MotionSampler {
        &self.round.sampler
    }

    /// Subscriptions currently held by the session
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.leases
    }

    /// Live subscription for a channel, if any
    pub fn subscription(&self, channel: Channel) -> Option<Subscription> {
        self.leases.iter().copied().find(|s| s.channel == channel)
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Take queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            variant: self.variant,
            phase: self.phase,
            player: self.round.player.pos,
            targets: self.round.targets.iter().map(|t| t.pos).collect(),
            score: self.round.score,
            time_left: self.round.clock.remaining(),
        }
    }

    // === Transitions ===

    /// `Start -> Playing`. Returns false (no-op) from any other phase.
    pub fn start_round(&mut self) -> bool {
        if self.phase != Phase::Start {
            log::debug!("start_round ignored in {:?}", self.phase);
            return false;
        }

        let round = self.round.round + 1;
        let player_size = self.variant.player_size(&self.settings);
        let target_size = self.variant.target_size(&self.settings);
        let max = self.bounds.max_anchor(player_size);

        let (player_pos, targets) = match self.variant {
            GameVariant::SpaceRunner => {
                let y = self.bounds.height - player_size - self.settings.runner_bottom_margin;
                let asteroid = spawn_asteroid(&mut self.rng, &self.bounds, target_size);
                (Vec2::new(max.x / 2.0, y.clamp(0.0, max.y)), vec![asteroid])
            }
            GameVariant::OrbFreePlay | GameVariant::OrbCollector => {
                let orbs = (0..self.settings.orb_count)
                    .map(|_| spawn_orb(&mut self.rng, &self.bounds, target_size))
                    .collect();
                (max / 2.0, orbs)
            }
        };

        let clock = if self.variant.is_timed() {
            RoundClock::start(self.settings.round_seconds)
        } else {
            RoundClock::idle(self.settings.round_seconds)
        };

        self.round = RoundState {
            round,
            player: Entity::new(player_pos, player_size),
            targets,
            score: 0,
            clock,
            sampler: MotionSampler::new(),
        };
        self.phase = Phase::Playing;

        self.acquire(Channel::Motion, self.settings.sample_period_ms);
        if self.variant.is_timed() {
            self.acquire(Channel::RoundClock, self.settings.clock_period_ms);
        }
        if self.variant.has_spawner() {
            self.acquire(Channel::Spawner, self.settings.spawner_period_ms);
        }

        log::info!("Round {} started ({})", round, self.variant.as_str());
        self.events.push(SessionEvent::RoundStarted { round });
        true
    }

    /// `GameOver -> Start`. Discards the finished round.
    pub fn acknowledge_game_over(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            log::debug!("acknowledge_game_over ignored in {:?}", self.phase);
            return false;
        }
        self.round = RoundState::idle(
            self.round.round,
            self.variant.player_size(&self.settings),
            self.settings.round_seconds,
        );
        self.phase = Phase::Start;
        self.events.push(SessionEvent::ReturnedToStart);
        true
    }

    // === Event handlers ===

    /// New orientation sample: store, move, re-check collisions.
    ///
    /// Returns false when the sample was ignored (not playing, or a token from
    /// a released/older subscription).
    pub fn on_motion(&mut self, sub: Subscription, sample: OrientationSample) -> bool {
        if !self.accepts(sub, Channel::Motion) {
            return false;
        }
        let sample = self.round.sampler.record(sample);
        let player = &mut self.round.player;
        player.pos = apply_tilt(
            player.pos,
            sample,
            self.settings.sensitivity,
            &self.bounds,
            player.size,
            self.variant.axis_lock(),
        );
        self.resolve_collisions(Trigger::PlayerMoved);
        true
    }

    /// One-second countdown tick
    pub fn on_clock_tick(&mut self, sub: Subscription) -> bool {
        if !self.accepts(sub, Channel::RoundClock) {
            return false;
        }
        match self.round.clock.tick() {
            ClockTick::Running(left) => log::trace!("{left}s left"),
            ClockTick::Expired => {
                log::info!("Round {} time up, score {}", self.round.round, self.round.score);
                self.events.push(SessionEvent::TimeExpired);
                self.end_round();
            }
            ClockTick::Stopped => {}
        }
        true
    }

    /// Obstacle ticker: advance the field, maybe spawn, re-check collisions
    pub fn on_spawner_tick(&mut self, sub: Subscription) -> bool {
        if !self.accepts(sub, Channel::Spawner) {
            return false;
        }
        let dropped = advance_asteroids(
            &mut self.round.targets,
            self.settings.asteroid_step,
            self.bounds.height,
        );
        if dropped > 0 {
            log::trace!("{dropped} asteroid(s) left the screen");
        }
        if self.rng.random_bool(self.settings.spawn_chance) {
            let size = self.variant.target_size(&self.settings);
            let asteroid = spawn_asteroid(&mut self.rng, &self.bounds, size);
            self.round.targets.push(asteroid);
        }
        self.resolve_collisions(Trigger::SpawnerTick);
        true
    }

    /// Reposition one target and re-check collisions (scripted placement)
    pub fn move_target(&mut self, index: usize, pos: Vec2) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(target) = self.round.targets.get_mut(index) else {
            return false;
        };
        target.pos = pos;
        self.resolve_collisions(Trigger::TargetsMoved);
        true
    }

    // === Internals ===

    fn accepts(&self, sub: Subscription, channel: Channel) -> bool {
        let live = self.phase == Phase::Playing
            && sub.channel == channel
            && self.leases.contains(&sub);
        if !live {
            log::debug!(
                "Ignoring {:?} delivery for round {} ({:?}, round {})",
                sub.channel,
                sub.round,
                self.phase,
                self.round.round
            );
        }
        live
    }

    fn acquire(&mut self, channel: Channel, period_ms: u32) {
        let sub = Subscription::new(self.round.round, channel);
        match self.platform.subscribe(sub, period_ms) {
            Ok(()) => self.leases.push(sub),
            Err(e) => log::warn!("{e} - continuing without it"),
        }
    }

    /// Drop every live subscription. Safe to call repeatedly.
    fn release_all(&mut self) {
        for sub in self.leases.drain(..) {
            self.platform.unsubscribe(sub);
        }
    }

    fn end_round(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.phase = Phase::GameOver;
        self.round.clock.stop();
        self.release_all();
        log::info!("Round {} over, final score {}", self.round.round, self.round.score);
    }

    fn resolve_collisions(&mut self, trigger: Trigger) {
        if self.phase != Phase::Playing {
            return;
        }
        let hits = collision::hits(&self.round.player, &self.round.targets);

        if self.variant.fatal_collisions() {
            if !hits.is_empty() {
                log::debug!("Asteroid hit ({:?})", trigger);
                self.events.push(SessionEvent::ObstacleHit);
                self.end_round();
            } else if trigger == Trigger::SpawnerTick {
                self.round.score += 1;
            }
            return;
        }

        for i in hits {
            let size = self.round.targets[i].size;
            self.round.targets[i] = spawn_orb(&mut self.rng, &self.bounds, size);
            self.round.score += 1;
            log::debug!("Orb collected ({:?}), score {}", trigger, self.round.score);
            self.events.push(SessionEvent::OrbCollected {
                score: self.round.score,
            });
        }
    }
}

impl<P: Platform> Drop for Session<P> {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl Session<VirtualPlatform> {
    /// Run the virtual clock forward, feeding `tilt(at_ms)` to every motion
    /// delivery. Stops early once the round is no longer playing.
    pub fn run_for(&mut self, ms: u64, mut tilt: impl FnMut(u64) -> OrientationSample) {
        let deadline = self.platform.now_ms() + ms;
        while self.phase == Phase::Playing {
            let Some(delivery) = self.platform.poll(deadline) else {
                break;
            };
            match delivery.sub.channel {
                Channel::Motion => {
                    self.on_motion(delivery.sub, tilt(delivery.at_ms));
                }
                Channel::Spawner => {
                    self.on_spawner_tick(delivery.sub);
                }
                Channel::RoundClock => {
                    self.on_clock_tick(delivery.sub);
                }
            }
        }
    }
}

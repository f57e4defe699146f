//! Virtual-time host
//!
//! Drives periodic channels on a millisecond counter instead of wall time, so
//! a whole round can be replayed deterministically (headless driver, tests).

use std::collections::BTreeMap;

use super::{Channel, Platform, PlatformError, Subscription};

/// A due event popped from the virtual clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub sub: Subscription,
    /// Virtual time the event fired at (ms)
    pub at_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct Interval {
    sub: Subscription,
    period_ms: u64,
    next_due: u64,
}

/// Per-channel lifecycle counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    pub subscribed: u32,
    pub unsubscribed: u32,
}

/// Platform implementation backed by a virtual millisecond clock
#[derive(Debug, Default)]
pub struct VirtualPlatform {
    now_ms: u64,
    active: BTreeMap<Channel, Interval>,
    unavailable: Vec<Channel>,
    stats: BTreeMap<Channel, ChannelStats>,
}

impl VirtualPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose given channel refuses subscriptions (e.g. no gyroscope)
    pub fn without(channel: Channel) -> Self {
        Self {
            unavailable: vec![channel],
            ..Self::default()
        }
    }

    /// Current virtual time (ms)
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Whether a channel currently has a live interval
    pub fn is_active(&self, channel: Channel) -> bool {
        self.active.contains_key(&channel)
    }

    /// Live subscription for a channel, if any
    pub fn active_subscription(&self, channel: Channel) -> Option<Subscription> {
        self.active.get(&channel).map(|i| i.sub)
    }

    /// Period a channel was subscribed with, if live
    pub fn period_ms(&self, channel: Channel) -> Option<u32> {
        self.active.get(&channel).map(|i| i.period_ms as u32)
    }

    /// Number of live intervals
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn stats(&self, channel: Channel) -> ChannelStats {
        self.stats.get(&channel).copied().unwrap_or_default()
    }

    /// Pop the earliest event due at or before `deadline_ms`.
    ///
    /// Ties on due time resolve in channel order (Motion, Spawner, RoundClock).
    /// When nothing is due, time jumps to the deadline and `None` is returned.
    pub fn poll(&mut self, deadline_ms: u64) -> Option<Delivery> {
        let next = self
            .active
            .values()
            .filter(|i| i.next_due <= deadline_ms)
            .min_by_key(|i| (i.next_due, i.sub.channel))
            .map(|i| i.sub.channel);

        match next {
            Some(channel) => {
                let interval = self.active.get_mut(&channel)?;
                let at_ms = interval.next_due;
                interval.next_due += interval.period_ms;
                self.now_ms = at_ms;
                Some(Delivery {
                    sub: interval.sub,
                    at_ms,
                })
            }
            None => {
                self.now_ms = self.now_ms.max(deadline_ms);
                None
            }
        }
    }

    /// Collect every event due within the next `ms` milliseconds.
    ///
    /// Unsubscriptions made while handling them are not seen by this batch;
    /// use [`poll`](Self::poll) to interleave handling with delivery.
    pub fn advance(&mut self, ms: u64) -> Vec<Delivery> {
        let deadline = self.now_ms + ms;
        let mut out = Vec::new();
        while let Some(delivery) = self.poll(deadline) {
            out.push(delivery);
        }
        out
    }
}

impl Platform for VirtualPlatform {
    fn subscribe(&mut self, sub: Subscription, period_ms: u32) -> Result<(), PlatformError> {
        if self.unavailable.contains(&sub.channel) {
            return Err(PlatformError::Unavailable(sub.channel));
        }
        let period_ms = u64::from(period_ms.max(1));
        self.active.insert(
            sub.channel,
            Interval {
                sub,
                period_ms,
                next_due: self.now_ms + period_ms,
            },
        );
        self.stats.entry(sub.channel).or_default().subscribed += 1;
        log::debug!("{:?} subscribed every {}ms (round {})", sub.channel, period_ms, sub.round);
        Ok(())
    }

    fn unsubscribe(&mut self, sub: Subscription) {
        if self.active.get(&sub.channel).is_some_and(|i| i.sub == sub) {
            self.active.remove(&sub.channel);
            self.stats.entry(sub.channel).or_default().unsubscribed += 1;
            log::debug!("{:?} unsubscribed (round {})", sub.channel, sub.round);
        }
    }
}

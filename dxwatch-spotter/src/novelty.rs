//! Cooldown gate for novelty alerts
//!
//! Remembers when each (entity, band) pair last produced a novelty alert
//! and suppresses repeats inside the cooldown window. The tracker is an
//! owned state object held by the classifier, so a reconnect or a test gets
//! a clean instance instead of poking at process-wide state.
//!
//! The map grows with the finite (entity × band) domain, a few hundred
//! entries at most, so there is no eviction.

use dxwatch_common::Band;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Time-windowed suppression of repeated novelty alerts.
pub struct NoveltyTracker {
    last_alert: HashMap<(u32, Band), Instant>,
    cooldown: Duration,
}

impl NoveltyTracker {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            last_alert: HashMap::new(),
            cooldown,
        }
    }

    /// Check-and-stamp the cooldown gate for one (entity, band) pair.
    ///
    /// Passes when the pair has never alerted, or when more than the
    /// cooldown has elapsed since it last did. A passing check records the
    /// current time as the new last-alert time in the same step, so two
    /// back-to-back spots of the same pair cannot both pass. A failing
    /// check leaves the recorded time untouched.
    pub fn exceeds_threshold(&mut self, dxcc: u32, band: Band) -> bool {
        self.check_at(dxcc, band, Instant::now())
    }

    fn check_at(&mut self, dxcc: u32, band: Band, now: Instant) -> bool {
        match self.last_alert.get(&(dxcc, band)) {
            Some(&last) if now.duration_since(last) <= self.cooldown => false,
            _ => {
                self.last_alert.insert((dxcc, band), now);
                true
            }
        }
    }

    /// Forget all suppression state.
    ///
    /// Used on session reconnect: a clean slate may repeat an alert early,
    /// never lose one.
    pub fn reset(&mut self) {
        self.last_alert.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(3600);

    #[test]
    fn test_first_check_passes() {
        let mut tracker = NoveltyTracker::new(COOLDOWN);
        assert!(tracker.exceeds_threshold(339, Band::B20));
    }

    #[test]
    fn test_immediate_repeat_fails() {
        let mut tracker = NoveltyTracker::new(COOLDOWN);
        let t0 = Instant::now();
        assert!(tracker.check_at(339, Band::B20, t0));
        assert!(!tracker.check_at(339, Band::B20, t0));
    }

    #[test]
    fn test_passes_again_after_cooldown_and_restamps() {
        let mut tracker = NoveltyTracker::new(COOLDOWN);
        let t0 = Instant::now();
        assert!(tracker.check_at(339, Band::B20, t0));

        // Exactly at the threshold is still inside the window
        assert!(!tracker.check_at(339, Band::B20, t0 + COOLDOWN));

        let t1 = t0 + COOLDOWN + Duration::from_secs(1);
        assert!(tracker.check_at(339, Band::B20, t1));

        // The pass at t1 restamped the window; shortly after t1 fails even
        // though it is long past t0
        assert!(!tracker.check_at(339, Band::B20, t1 + Duration::from_secs(1)));
    }

    #[test]
    fn test_failed_check_does_not_restamp() {
        let mut tracker = NoveltyTracker::new(COOLDOWN);
        let t0 = Instant::now();
        assert!(tracker.check_at(339, Band::B20, t0));

        // A failing check inside the window must not extend it
        assert!(!tracker.check_at(339, Band::B20, t0 + COOLDOWN - Duration::from_secs(1)));
        assert!(tracker.check_at(339, Band::B20, t0 + COOLDOWN + Duration::from_secs(1)));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut tracker = NoveltyTracker::new(COOLDOWN);
        let t0 = Instant::now();
        assert!(tracker.check_at(339, Band::B20, t0));
        // Same entity, other band; other entity, same band
        assert!(tracker.check_at(339, Band::B40, t0));
        assert!(tracker.check_at(291, Band::B20, t0));
        assert!(!tracker.check_at(339, Band::B20, t0));
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut tracker = NoveltyTracker::new(COOLDOWN);
        let t0 = Instant::now();
        assert!(tracker.check_at(339, Band::B20, t0));
        tracker.reset();
        assert!(tracker.check_at(339, Band::B20, t0));
    }
}

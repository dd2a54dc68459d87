//! Repeat suppression for spoken phrases.

use crate::clock::{Clock, SystemClock};
use std::time::{Duration, Instant};

/// Blocks the same phrase from being spoken again within `interval`.
///
/// A different phrase is always allowed through; only exact repeats are
/// held back.
pub struct SpeechGate<C: Clock = SystemClock> {
    interval: Duration,
    last: Option<(String, Instant)>,
    clock: C,
}

impl<C: Clock> SpeechGate<C> {
    pub fn with_clock(interval: Duration, clock: C) -> Self {
        Self {
            interval,
            last: None,
            clock,
        }
    }

    /// True if `text` was the last phrase spoken and the interval hasn't passed.
    pub fn is_cooling_down(&self, text: &str) -> bool {
        match &self.last {
            Some((last_text, at)) => {
                last_text == text && self.clock.now().duration_since(*at) < self.interval
            }
            None => false,
        }
    }

    /// Marks `text` as spoken now.
    pub fn record(&mut self, text: &str) {
        self.last = Some((text.to_string(), self.clock.now()));
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_text(&self) -> Option<&str> {
        self.last.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl SpeechGate<SystemClock> {
    pub fn new(interval: Duration) -> Self {
        Self::with_clock(interval, SystemClock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;

    #[test]
    fn test_first_phrase_allowed() {
        let gate = SpeechGate::new(Duration::from_secs(3));
        assert!(!gate.is_cooling_down("Halo"));
    }

    #[test]
    fn test_same_phrase_blocked_within_interval() {
        let clock = MockClock::new();
        let mut gate = SpeechGate::with_clock(Duration::from_secs(3), clock.clone());
        gate.record("Halo");
        clock.advance(Duration::from_millis(2900));
        assert!(gate.is_cooling_down("Halo"));
    }

    #[test]
    fn test_same_phrase_allowed_after_interval() {
        let clock = MockClock::new();
        let mut gate = SpeechGate::with_clock(Duration::from_secs(3), clock.clone());
        gate.record("Halo");
        clock.advance(Duration::from_secs(3));
        assert!(!gate.is_cooling_down("Halo"));
    }

    #[test]
    fn test_different_phrase_always_allowed() {
        let clock = MockClock::new();
        let mut gate = SpeechGate::with_clock(Duration::from_secs(3), clock.clone());
        gate.record("Halo");
        assert!(!gate.is_cooling_down("Oke sip!"));
    }

    #[test]
    fn test_reset_forgets_last_phrase() {
        let mut gate = SpeechGate::new(Duration::from_secs(3));
        gate.record("Halo");
        assert_eq!(gate.last_text(), Some("Halo"));
        gate.reset();
        assert!(!gate.is_cooling_down("Halo"));
    }
}

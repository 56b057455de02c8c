//! Probability counter animation.
//!
//! The counter is a pure sequence `0, 1, .., target`; a [`Ticker`] turns
//! wall-clock time into a number of steps so the UI loop can drive it at
//! whatever rate it redraws.

use std::f64::consts::PI;
use std::time::Duration;

/// Radius of the circular progress ring.
pub const RING_RADIUS: f64 = 88.0;

/// Circumference of the progress ring.
#[must_use]
pub fn circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// Dash offset for a ring showing `percent`.
#[must_use]
pub fn stroke_offset(percent: u8) -> f64 {
    let c = circumference();
    c - (f64::from(percent) / 100.0) * c
}

/// Counts one unit at a time from 0 up to a target percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbabilityCounter {
    current: u8,
    target: u8,
}

impl ProbabilityCounter {
    #[must_use]
    pub fn new(target: u8) -> Self {
        Self {
            current: 0,
            target: target.min(100),
        }
    }

    #[must_use]
    pub fn current(&self) -> u8 {
        self.current
    }

    #[must_use]
    pub fn target(&self) -> u8 {
        self.target
    }

    /// True once `current == target`.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.current >= self.target
    }

    /// Advance by up to `steps`, returning how many were taken.
    pub fn advance(&mut self, steps: u32) -> u32 {
        let mut taken = 0;
        while taken < steps && self.next().is_some() {
            taken += 1;
        }
        taken
    }

    /// Jump straight to the target.
    pub fn finish(&mut self) {
        self.current = self.target;
    }
}

impl Iterator for ProbabilityCounter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.is_done() {
            return None;
        }
        self.current += 1;
        Some(self.current)
    }
}

/// Converts elapsed time into whole animation steps, carrying the remainder.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
    carry: Duration,
}

impl Ticker {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            carry: Duration::ZERO,
        }
    }

    /// Steps due after `elapsed` more time has passed.
    pub fn due(&mut self, elapsed: Duration) -> u32 {
        let total = (self.carry + elapsed).as_nanos();
        let interval = self.interval.as_nanos();
        self.carry = Duration::from_nanos((total % interval) as u64);
        u32::try_from(total / interval).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_sequence() {
        let values: Vec<u8> = ProbabilityCounter::new(5).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_zero_target_is_terminal() {
        let mut counter = ProbabilityCounter::new(0);
        assert!(counter.is_done());
        assert_eq!(counter.next(), None);
        assert_eq!(counter.current(), 0);
    }

    #[test]
    fn test_advance_stops_at_target() {
        let mut counter = ProbabilityCounter::new(72);
        assert_eq!(counter.advance(50), 50);
        assert_eq!(counter.current(), 50);
        assert_eq!(counter.advance(50), 22);
        assert_eq!(counter.current(), 72);
        assert!(counter.is_done());
        assert_eq!(counter.advance(1), 0);
    }

    #[test]
    fn test_stroke_offset() {
        assert!((stroke_offset(0) - circumference()).abs() < 1e-9);
        assert!(stroke_offset(100).abs() < 1e-9);
        assert!((stroke_offset(50) - circumference() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_ticker_carries_remainder() {
        let mut ticker = Ticker::new(Duration::from_millis(20));
        assert_eq!(ticker.due(Duration::from_millis(15)), 0);
        assert_eq!(ticker.due(Duration::from_millis(15)), 1);
        assert_eq!(ticker.due(Duration::from_millis(30)), 2);
        assert_eq!(ticker.due(Duration::from_millis(10)), 0);
        assert_eq!(ticker.due(Duration::from_millis(10)), 1);
    }
}

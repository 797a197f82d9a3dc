//! Injected time source.
//!
//! Participants started independently must agree on "now" for anything
//! time-driven in the scene, so the default clock counts seconds since the
//! most recent local midnight instead of since process start.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};

pub trait Clock: Send + Sync {
    /// Seconds elapsed since the clock's fixed reference instant.
    fn now_secs(&self) -> f64;
}

/// Wall clock anchored at the start of the current local day.
pub struct DayClock {
    midnight: DateTime<Local>,
}

impl DayClock {
    pub fn new() -> Self {
        let now = Local::now();
        let midnight = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .and_then(|naive| naive.and_local_timezone(Local).earliest())
            .unwrap_or(now);
        Self { midnight }
    }
}

impl Default for DayClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for DayClock {
    fn now_secs(&self) -> f64 {
        (Local::now() - self.midnight).num_milliseconds() as f64 / 1000.0
    }
}

/// Clock that only moves when told to. Used by tests and replay drivers.
#[derive(Default)]
pub struct ManualClock {
    bits: AtomicU64,
}

impl ManualClock {
    pub fn new(start_secs: f64) -> Self {
        Self {
            bits: AtomicU64::new(start_secs.to_bits()),
        }
    }

    pub fn set(&self, secs: f64) {
        self.bits.store(secs.to_bits(), Ordering::Relaxed);
    }

    pub fn advance(&self, secs: f64) {
        self.set(self.now_secs() + secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_clock_is_within_a_day() {
        let clock = DayClock::new();
        let t = clock.now_secs();
        assert!(t >= 0.0);
        // DST transitions can stretch a local day to 25 hours.
        assert!(t < 25.0 * 3600.0);
    }

    #[test]
    fn day_clock_is_monotonic_enough() {
        let clock = DayClock::new();
        let a = clock.now_secs();
        let b = clock.now_secs();
        assert!(b >= a);
    }

    #[test]
    fn manual_clock_starts_where_told() {
        let clock = ManualClock::new(12.5);
        assert!((clock.now_secs() - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn manual_clock_advance_and_set() {
        let clock = ManualClock::default();
        assert_eq!(clock.now_secs(), 0.0);
        clock.advance(1.5);
        clock.advance(0.5);
        assert!((clock.now_secs() - 2.0).abs() < f64::EPSILON);
        clock.set(100.0);
        assert!((clock.now_secs() - 100.0).abs() < f64::EPSILON);
    }
}

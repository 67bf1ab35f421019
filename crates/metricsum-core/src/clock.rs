//! Timestamp sources.
//!
//! Timestamps are `i64` nanoseconds since the Unix epoch. The store reads the
//! clock once per insert and once per windowed query.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock timestamps at nanosecond resolution.
pub trait Clock: Send + Sync {
    fn now_nanos(&self) -> i64;
}

/// Wall clock backed by `SystemTime`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> i64 {
        // A clock set before 1970 reads as the epoch; i64 nanos overflow in 2262.
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        i64::try_from(nanos).unwrap_or(i64::MAX)
    }
}

/// Deterministic clock for tests and replay.
///
/// A fixed clock returns the same instant until moved with [`set`](Self::set)
/// or [`advance`](Self::advance). A ticking clock returns its current value and
/// then steps forward, so concurrent readers always see distinct timestamps.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
    step: i64,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self { now: AtomicI64::new(start), step: 0 }
    }

    pub fn ticking(start: i64, step: i64) -> Self {
        Self { now: AtomicI64::new(start), step }
    }

    pub fn set(&self, nanos: i64) {
        self.now.store(nanos, Ordering::SeqCst);
    }

    pub fn advance(&self, nanos: i64) {
        self.now.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Current value without ticking.
    pub fn peek(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> i64 {
        if self.step == 0 {
            self.now.load(Ordering::SeqCst)
        } else {
            self.now.fetch_add(self.step, Ordering::SeqCst)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticking_clock_hands_out_distinct_instants() {
        let c = ManualClock::ticking(100, 3);
        assert_eq!(c.now_nanos(), 100);
        assert_eq!(c.now_nanos(), 103);
        assert_eq!(c.peek(), 106);
    }

    #[test]
    fn fixed_clock_moves_only_when_told() {
        let c = ManualClock::new(5);
        assert_eq!(c.now_nanos(), 5);
        assert_eq!(c.now_nanos(), 5);
        c.advance(10);
        assert_eq!(c.now_nanos(), 15);
        c.set(-1);
        assert_eq!(c.now_nanos(), -1);
    }

    #[test]
    fn system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_nanos() > 1_577_836_800_000_000_000);
    }
}

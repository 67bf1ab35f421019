use std::time::Duration;

/// Trailing duration covered by sums and sweeps, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    nanos: i64,
}

impl TimeWindow {
    pub fn from_nanos(nanos: i64) -> Self {
        Self { nanos: nanos.max(0) }
    }

    pub fn from_duration(d: Duration) -> Self {
        Self::from_nanos(i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
    }

    pub fn as_nanos(self) -> i64 {
        self.nanos
    }

    /// Boundary separating in-window samples from expired ones at `now`.
    pub fn cutoff(self, now: i64) -> i64 {
        now.saturating_sub(self.nanos)
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::from_duration(Duration::from_secs(10))
    }
}

//! Time-windowed sample store.
//!
//! `name -> (timestamp -> value)`, held in a `DashMap` of `BTreeMap`s. Every
//! read or mutation of a series goes through the map's shard lock for that
//! name, so inserts, sums and sweeps never observe a series changing shape
//! under them. Callers only ever see sums, counts and copied snapshots.
//!
//! Timestamps come from the store's [`Clock`], never from the caller. Two
//! inserts for one name on the same nanosecond collapse into one sample: the
//! later value replaces the earlier one.
//!
//! Boundaries are asymmetric:
//! - [`SampleStore::sum_since`] counts samples with `ts > cutoff`;
//! - [`SampleStore::evict`] drops samples with `ts < cutoff`.
//!
//! A sample exactly at the cutoff is invisible to the sum but survives the
//! sweep.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};
use std::sync::Arc;

use dashmap::DashMap;

use crate::clock::{Clock, SystemClock};
use crate::window::TimeWindow;

type Series = BTreeMap<i64, i64>;

/// Outcome of one eviction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepReport {
    pub cutoff: i64,
    pub samples_removed: usize,
    /// Series left empty by the pass and dropped from the map.
    pub series_removed: usize,
}

pub struct SampleStore {
    series: DashMap<String, Series>,
    clock: Arc<dyn Clock>,
    window: TimeWindow,
}

impl SampleStore {
    /// Store on the system wall clock.
    pub fn new(window: TimeWindow) -> Self {
        Self::with_clock(window, Arc::new(SystemClock))
    }

    pub fn with_clock(window: TimeWindow, clock: Arc<dyn Clock>) -> Self {
        Self {
            series: DashMap::new(),
            clock,
            window,
        }
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn now(&self) -> i64 {
        self.clock.now_nanos()
    }

    /// Cutoff for the configured window at the current instant.
    pub fn cutoff(&self) -> i64 {
        self.window.cutoff(self.now())
    }

    /// Record `value` under `name` at the current instant and return the
    /// timestamp it was stored at.
    pub fn insert(&self, name: &str, value: i64) -> i64 {
        let ts = self.clock.now_nanos();

        let replaced = match self.series.get_mut(name) {
            Some(mut series) => series.insert(ts, value),
            None => self
                .series
                .entry(name.to_owned())
                .or_default()
                .insert(ts, value),
        };

        if let Some(old) = replaced {
            tracing::debug!(name, ts, old, new = value, "same-nanosecond insert replaced sample");
        } else {
            tracing::trace!(name, ts, value, "sample stored");
        }
        ts
    }

    /// Sum of samples for `name` strictly newer than `cutoff`.
    ///
    /// Unknown names sum to 0. The total saturates at the `i64` bounds.
    pub fn sum_since(&self, name: &str, cutoff: i64) -> i64 {
        let Some(series) = self.series.get(name) else {
            tracing::trace!(name, "sum over unknown series");
            return 0;
        };
        series
            .range((Excluded(cutoff), Unbounded))
            .fold(0i64, |acc, (_, v)| acc.saturating_add(*v))
    }

    /// Sum over the configured window ending now.
    pub fn window_sum(&self, name: &str) -> i64 {
        self.sum_since(name, self.cutoff())
    }

    /// Drop every sample older than `cutoff` across all series.
    ///
    /// Series emptied by the pass are removed from the map. Running the same
    /// cutoff twice leaves the store unchanged the second time.
    pub fn evict(&self, cutoff: i64) -> SweepReport {
        let mut report = SweepReport { cutoff, ..SweepReport::default() };

        self.series.retain(|_, samples| {
            // split_off keeps ts >= cutoff in the returned half.
            let kept = samples.split_off(&cutoff);
            report.samples_removed += samples.len();
            *samples = kept;
            if samples.is_empty() {
                report.series_removed += 1;
                false
            } else {
                true
            }
        });

        if report.samples_removed > 0 || report.series_removed > 0 {
            tracing::debug!(
                cutoff,
                samples_removed = report.samples_removed,
                series_removed = report.series_removed,
                "evicted expired samples"
            );
        }
        report
    }

    /// Evict everything outside the configured window ending now.
    pub fn sweep(&self) -> SweepReport {
        self.evict(self.cutoff())
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn sample_count(&self) -> usize {
        self.series.iter().map(|s| s.value().len()).sum()
    }

    /// Copy of every series, sorted by name then timestamp.
    pub fn dump(&self) -> Vec<(String, Vec<(i64, i64)>)> {
        let mut out: Vec<(String, Vec<(i64, i64)>)> = self
            .series
            .iter()
            .map(|s| {
                let samples = s.value().iter().map(|(ts, v)| (*ts, *v)).collect();
                (s.key().clone(), samples)
            })
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

impl std::fmt::Debug for SampleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleStore")
            .field("window", &self.window)
            .field("series", &self.series.len())
            .finish()
    }
}

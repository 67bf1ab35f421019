//! Background sweeper.
//!
//! Sleeps for `window + grace`, sweeps the store, repeats. A sample is at most
//! `window + grace` old when a sweep reaches it, and the sweep cutoff is
//! `now - window`, so nothing younger than the window is ever removed.
//!
//! The loop ends when [`Janitor::shutdown`] is called or the `Janitor` value is
//! dropped; both interrupt the sleep immediately.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use metricsum_core::SampleStore;

use crate::app_state::AppState;

/// Start the janitor configured for `app`, or `None` when `janitor.enabled`
/// is false and eviction is left to `/cleanup`.
pub fn spawn_janitor(app: &AppState) -> Option<Janitor> {
    if !app.cfg().janitor.enabled {
        tracing::warn!("janitor disabled; samples are evicted only via /cleanup");
        return None;
    }
    Some(Janitor::spawn(app.store(), app.cfg().window.sweep_interval()))
}

pub struct Janitor {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Janitor {
    /// Spawn the sweep loop on the current tokio runtime.
    pub fn spawn(store: Arc<SampleStore>, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(run(store, interval, stop_rx));
        Self { stop_tx, handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signal the loop to stop and wait for it to exit.
    pub async fn shutdown(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "janitor task did not exit cleanly");
        }
    }
}

async fn run(store: Arc<SampleStore>, interval: Duration, mut stop_rx: watch::Receiver<bool>) {
    let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
    tracing::info!(interval_ms, "janitor started");

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {
                let report = store.sweep();
                tracing::debug!(
                    cutoff = report.cutoff,
                    samples_removed = report.samples_removed,
                    series_removed = report.series_removed,
                    series_left = store.series_count(),
                    "janitor sweep"
                );
            }
            // Err: the Janitor handle was dropped.
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
        }
    }

    tracing::info!("janitor stopped");
}

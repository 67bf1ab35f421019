//! Shared application state for the metricsum gateway.
//!
//! One `SampleStore` is built at startup and handed to the router and the
//! janitor by `Arc`; nothing is re-created per request.

use std::sync::Arc;

use metricsum_core::error::Result;
use metricsum_core::{Clock, SampleStore, SystemClock};

use crate::config::ServiceConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    store: Arc<SampleStore>,
}

impl AppState {
    /// Build application state on the system clock.
    pub fn new(cfg: ServiceConfig) -> Result<Self> {
        Self::with_clock(cfg, Arc::new(SystemClock))
    }

    pub fn with_clock(cfg: ServiceConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        cfg.validate()?;
        let store = Arc::new(SampleStore::with_clock(cfg.window.window(), clock));

        tracing::debug!(
            window_ms = cfg.window.window_ms,
            grace_ms = cfg.window.grace_ms,
            janitor = cfg.janitor.enabled,
            "app state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, store }),
        })
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<SampleStore> {
        Arc::clone(&self.inner.store)
    }
}

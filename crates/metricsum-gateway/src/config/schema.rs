use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use metricsum_core::error::{MetricError, Result};
use metricsum_core::TimeWindow;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub window: WindowSection,

    #[serde(default)]
    pub janitor: JanitorSection,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricError::Config(format!(
                "unsupported config version {} (expected 1)",
                self.version
            )));
        }

        self.server.validate()?;
        self.window.validate()?;

        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            window: WindowSection::default(),
            janitor: JanitorSection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            MetricError::Config(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }
}

fn default_listen() -> String {
    "0.0.0.0:9999".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowSection {
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Extra delay added to the window between two janitor sweeps.
    #[serde(default = "default_grace_ms")]
    pub grace_ms: u64,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            grace_ms: default_grace_ms(),
        }
    }
}

impl WindowSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=86_400_000).contains(&self.window_ms) {
            return Err(MetricError::Config(
                "window.window_ms must be between 1 and 86400000".into(),
            ));
        }
        if self.grace_ms > 3_600_000 {
            return Err(MetricError::Config(
                "window.grace_ms must be between 0 and 3600000".into(),
            ));
        }
        Ok(())
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::from_duration(Duration::from_millis(self.window_ms))
    }

    /// Period between janitor sweeps: window plus grace.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.window_ms + self.grace_ms)
    }
}

fn default_window_ms() -> u64 {
    10_000
}
fn default_grace_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JanitorSection {
    /// When false, samples are only evicted through `/cleanup`.
    #[serde(default = "default_janitor_enabled")]
    pub enabled: bool,
}

impl Default for JanitorSection {
    fn default() -> Self {
        Self { enabled: default_janitor_enabled() }
    }
}

fn default_janitor_enabled() -> bool {
    true
}

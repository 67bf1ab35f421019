//! Service config loader (strict parsing).

pub mod schema;

use std::fs;

use metricsum_core::error::{MetricError, Result};

pub use schema::{JanitorSection, ServerSection, ServiceConfig, WindowSection};

/// Used when neither a CLI argument nor `METRICSUM_CONFIG` names a file.
pub const DEFAULT_CONFIG_PATH: &str = "metricsum.yaml";

pub fn load_from_file(path: &str) -> Result<ServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

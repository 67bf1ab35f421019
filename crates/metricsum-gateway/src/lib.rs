//! metricsum gateway library entry.
//!
//! Wires the HTTP transport, config, and background janitor around the core
//! `SampleStore`. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod janitor;
pub mod router;
pub mod transport;

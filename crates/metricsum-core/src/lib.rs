//! metricsum core: the time-windowed sample store, its clock seam, and the
//! error surface shared with the gateway.
//!
//! This crate carries no transport or runtime dependencies. The gateway wraps
//! it with HTTP routing and a background sweeper; tests drive it directly with
//! a [`ManualClock`].
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! The store itself never fails for well-formed calls; malformed client input
//! is rejected before it reaches the store and surfaces as `MetricError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod clock;
pub mod error;
pub mod store;
pub mod window;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ClientCode, MetricError, Result};
pub use store::{SampleStore, SweepReport};
pub use window::TimeWindow;

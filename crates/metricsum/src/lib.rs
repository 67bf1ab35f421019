//! Top-level facade crate for metricsum.
//!
//! Re-exports the core store and the gateway library so users can depend on a single crate.

pub mod core {
    pub use metricsum_core::*;
}

pub mod gateway {
    pub use metricsum_gateway::*;
}

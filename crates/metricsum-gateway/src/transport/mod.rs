//! Transport layer (HTTP).
//!
//! Translates requests into `SampleStore` calls and renders the fixed
//! response bodies. No state lives here beyond what `AppState` hands out.

pub mod handlers;
pub mod params;
pub mod response;

//! Shared error type across metricsum crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Write request without a `value` field.
    MissingValue,
    /// `value` present but not a decimal integer.
    NonNumericValue,
    /// No route for the path/method.
    BadUri,
    /// Invalid startup configuration.
    BadConfig,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::MissingValue => "MISSING_VALUE",
            ClientCode::NonNumericValue => "NON_NUMERIC_VALUE",
            ClientCode::BadUri => "BAD_URI",
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricError>;

/// Unified error type used by core and gateway.
///
/// The `Display` text of the two value variants is the exact body returned to
/// HTTP clients, so it must not change.
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("POST with out a {{ value: nnn }}")]
    MissingValue,
    /// Carries the raw input for logging; it is never echoed to the client.
    #[error("POST value non-numeric or error")]
    NonNumericValue(String),
    #[error("BAD URI - 404\n\t{0}\n")]
    BadUri(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetricError::MissingValue => ClientCode::MissingValue,
            MetricError::NonNumericValue(_) => ClientCode::NonNumericValue,
            MetricError::BadUri(_) => ClientCode::BadUri,
            MetricError::Config(_) => ClientCode::BadConfig,
            MetricError::Internal(_) => ClientCode::Internal,
        }
    }
}

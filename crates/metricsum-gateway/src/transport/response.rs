//! Response bodies and the HTTP mapping of `MetricError`.
//!
//! Bodies are fixed strings kept byte-compatible with existing clients, so
//! they are formatted by hand rather than through a serializer.

use axum::{
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
};

use metricsum_core::MetricError;

const JSON: &str = "application/json";

pub const POWERED_BY: &str = "superduperwebmanagementool";

/// `MetricError` at the request boundary.
#[derive(Debug)]
pub struct HttpError(pub MetricError);

impl From<MetricError> for HttpError {
    fn from(e: MetricError) -> Self {
        Self(e)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            MetricError::MissingValue | MetricError::NonNumericValue(_) | MetricError::BadUri(_) => {
                StatusCode::NOT_FOUND
            }
            MetricError::Config(_) | MetricError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.0.to_string()).into_response()
    }
}

pub fn empty_object() -> Response {
    ([(header::CONTENT_TYPE, JSON)], "{}").into_response()
}

/// `{}` plus the headers the service has always sent on accepted writes.
pub fn write_accepted() -> Response {
    (
        [
            (header::CONTENT_TYPE, JSON),
            (HeaderName::from_static("x-powered-by"), POWERED_BY),
            (header::CONNECTION, "close"),
        ],
        "{}",
    )
        .into_response()
}

pub fn sum_body(value: i64) -> String {
    format!("{{ \"value\": {value} }}")
}

pub fn sum(value: i64) -> Response {
    ([(header::CONTENT_TYPE, JSON)], sum_body(value)).into_response()
}

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, Method, Uri},
    response::Response,
};
use bytes::Bytes;
use percent_encoding::percent_decode_str;

use metricsum_core::MetricError;

use crate::app_state::AppState;

use super::params::extract_value;
use super::response::{self, HttpError};

// POST /metric/:name  and  POST /metric/:name/
pub async fn post_metric(
    State(app): State<AppState>,
    Path(name): Path<String>,
    uri: Uri,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HttpError> {
    if name.is_empty() {
        return Err(no_route(&Method::POST, &uri));
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let value = match extract_value(query.as_deref(), content_type, &body) {
        Ok(v) => v,
        Err(e) => {
            if let MetricError::NonNumericValue(raw) = &e {
                tracing::debug!(name = %name, raw = %raw, "rejected non-numeric value");
            } else {
                tracing::debug!(name = %name, "rejected write without value");
            }
            return Err(e.into());
        }
    };

    let store = app.store();
    let ts = store.insert(&name, value);
    tracing::debug!(name = %name, ts, value, "metric recorded");
    dump_store(&app);

    Ok(response::write_accepted())
}

// GET /metric/:name/sum
pub async fn metric_sum(
    State(app): State<AppState>,
    Path(name): Path<String>,
    uri: Uri,
) -> Result<Response, HttpError> {
    if name.is_empty() {
        return Err(no_route(&Method::GET, &uri));
    }

    let store = app.store();
    let cutoff = store.cutoff();
    let sum = store.sum_since(&name, cutoff);
    tracing::debug!(name = %name, cutoff, sum, "metric sum");
    dump_store(&app);

    Ok(response::sum(sum))
}

// GET|POST /cleanup
pub async fn cleanup(State(app): State<AppState>) -> Response {
    let report = app.store().sweep();
    tracing::info!(
        cutoff = report.cutoff,
        samples_removed = report.samples_removed,
        series_removed = report.series_removed,
        "manual cleanup"
    );
    response::empty_object()
}

/// Catch-all for unknown paths and unsupported methods on known paths.
pub async fn bad_uri(method: Method, uri: Uri) -> HttpError {
    no_route(&method, &uri)
}

/// `BAD URI` error echoing the percent-decoded path.
fn no_route(method: &Method, uri: &Uri) -> HttpError {
    let path = percent_decode_str(uri.path()).decode_utf8_lossy().into_owned();
    tracing::debug!(%method, path = %path, "no route");
    HttpError(MetricError::BadUri(path))
}

fn dump_store(app: &AppState) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    for (name, samples) in app.store().dump() {
        tracing::trace!(name = %name, ?samples, "series");
    }
}

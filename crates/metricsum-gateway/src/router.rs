//! Axum router wiring.
//!
//! Every route carries the `bad_uri` fallback so a wrong method answers 404
//! with the same body as an unknown path instead of axum's default 405.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, transport::handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/metric/:name",
            post(handlers::post_metric).fallback(handlers::bad_uri),
        )
        .route(
            "/metric/:name/",
            post(handlers::post_metric).fallback(handlers::bad_uri),
        )
        .route(
            "/metric/:name/sum",
            get(handlers::metric_sum).fallback(handlers::bad_uri),
        )
        .route(
            "/cleanup",
            get(handlers::cleanup)
                .post(handlers::cleanup)
                .fallback(handlers::bad_uri),
        )
        .fallback(handlers::bad_uri)
        .with_state(state)
}

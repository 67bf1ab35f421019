//! metricsum gateway
//!
//! - POST /metric/:name        record a sample (`value` field)
//! - GET  /metric/:name/sum    sum over the trailing window
//! - GET|POST /cleanup         evict expired samples now
//! - background janitor sweeping every window + grace

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use metricsum_core::error::{MetricError, Result};
use metricsum_gateway::{app_state::AppState, config, janitor::spawn_janitor, router};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.client_code().as_str(), error = %e, "metricsum-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("METRICSUM_CONFIG").ok())
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());

    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = AppState::new(cfg)?;
    let janitor = spawn_janitor(&state);

    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "metricsum-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MetricError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MetricError::Internal(format!("server failed: {e}")))?;

    if let Some(janitor) = janitor {
        janitor.shutdown().await;
    }
    tracing::info!("metricsum-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}

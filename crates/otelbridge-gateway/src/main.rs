//! otelbridge gateway
//!
//! Receives OTLP/JSON metric pushes and serves the latest token/cost values as
//! Prometheus text on the same path:
//! - POST <metrics_path>: ingest a push
//! - GET  <metrics_path>: snapshot for pollers
//!
//! Config: `$OTELBRIDGE_CONFIG` (default `otelbridge.yaml`); a missing file
//! means defaults.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use otelbridge_gateway::{app_state, config, router};

const CONFIG_ENV: &str = "OTELBRIDGE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "otelbridge.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = match config::load_or_default(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, %path, "config load failed");
            return ExitCode::FAILURE;
        }
    };
    let listen = match cfg.bridge.listen_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "bad listen address");
            return ExitCode::FAILURE;
        }
    };

    let metrics_path = cfg.bridge.metrics_path.clone();
    let ops_enabled = cfg.ops.enabled;
    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    let listener = match tokio::net::TcpListener::bind(listen).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, %listen, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%listen, "otelbridge-gateway starting");
    tracing::info!("receiving OTLP at: POST http://{listen}{metrics_path}");
    tracing::info!("exposing Prometheus at: GET http://{listen}{metrics_path}");
    if ops_enabled {
        tracing::info!("ops endpoints at: http://{listen}/healthz, http://{listen}/metrics");
    }

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("shut down");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
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

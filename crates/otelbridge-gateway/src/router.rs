//! Axum router wiring.
//!
//! One resource (`bridge.metrics_path`): POST pushes OTLP/JSON, GET pulls the
//! exposition snapshot. Every other path is 404. Ops routes are added only
//! when enabled in config.

use axum::{extract::DefaultBodyLimit, http::StatusCode, routing::get, Router};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let metrics_path = state.cfg().bridge.metrics_path.clone();
    let body_limit = state.cfg().bridge.max_body_bytes;

    let mut router = Router::new().route(
        &metrics_path,
        get(transport::http::pull_metrics).post(transport::http::push_metrics),
    );

    if state.cfg().ops.enabled {
        router = router
            .route("/healthz", get(ops::healthz))
            .route("/metrics", get(ops::metrics));
    }

    router
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

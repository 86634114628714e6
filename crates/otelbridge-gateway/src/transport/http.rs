//! Push/pull handlers for the metrics resource.
//!
//! - POST: screen encoding -> decode (no lock) -> reduce under the write lock
//! - GET: render a snapshot from a read-locked copy

use axum::{
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::json;

use otelbridge_core::{error::BridgeError, ingest};

use crate::app_state::AppState;
use crate::obs::metrics::outcome;
use crate::transport::codec::decode_push;

/// Content type of the snapshot body.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// `BridgeError` as an HTTP response.
#[derive(Debug)]
pub struct HttpError(pub BridgeError);

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            // The producer sent something we could not read; surface it as a
            // server-side failure so OTLP exporters log it and move on.
            BridgeError::MalformedPayload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BridgeError::UnsupportedEncoding(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            BridgeError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            BridgeError::InvalidConfig(_)
            | BridgeError::UnsupportedVersion
            | BridgeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BridgeError> for HttpError {
    fn from(e: BridgeError) -> Self {
        Self(e)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

pub async fn push_metrics(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, HttpError> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            app.metrics().record_rejected(outcome::TOO_LARGE);
            tracing::warn!(limit = app.cfg().bridge.max_body_bytes, "push rejected: body too large");
            return Err(BridgeError::PayloadTooLarge.into());
        }
        Err(rejection) => {
            app.metrics().record_rejected(outcome::MALFORMED);
            tracing::warn!(error = %rejection, "push rejected: body unreadable");
            return Err(BridgeError::MalformedPayload(rejection.body_text()).into());
        }
    };

    let body_len = body.len();
    let req = match decode_push(&headers, body) {
        Ok(req) => req,
        Err(e) => {
            let label = match e {
                BridgeError::UnsupportedEncoding(_) => outcome::UNSUPPORTED_ENCODING,
                _ => outcome::MALFORMED,
            };
            app.metrics().record_rejected(label);
            tracing::warn!(error = %e, body_len, "push rejected");
            return Err(e.into());
        }
    };

    let summary = ingest(app.store(), &req);
    app.metrics().record_ingest(&summary);
    tracing::info!(
        body_len,
        metrics = summary.metrics_seen,
        token_reports = summary.token_reports,
        cost_reports = summary.cost_reports,
        applied = summary.points_applied,
        skipped = summary.points_skipped,
        "push ingested"
    );

    Ok(StatusCode::OK)
}

pub async fn pull_metrics(State(app): State<AppState>) -> Response {
    app.metrics().record_pull();
    let body = app.store().render();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        body,
    )
        .into_response()
}

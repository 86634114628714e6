//! Push encoding screen.
//!
//! - `application/json` (any parameters, any case) => decode as OTLP/JSON
//! - no Content-Type => decode as OTLP/JSON
//! - anything else (`application/x-protobuf`, ...) => `UnsupportedEncoding`

use axum::http::{header, HeaderMap};
use bytes::Bytes;
use otelbridge_core::{
    error::{BridgeError, Result},
    protocol::otlp::{decode_metrics_request, ExportMetricsRequest},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushEncoding {
    Json,
}

impl PushEncoding {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
        let Some(v) = headers.get(header::CONTENT_TYPE) else {
            return Ok(PushEncoding::Json);
        };
        let ct = v
            .to_str()
            .map_err(|_| BridgeError::UnsupportedEncoding("non-ascii content-type".into()))?;
        let mime = ct.split(';').next().unwrap_or("").trim();
        if mime.eq_ignore_ascii_case("application/json") {
            Ok(PushEncoding::Json)
        } else {
            Err(BridgeError::UnsupportedEncoding(format!(
                "content-type {ct:?} is not supported, send OTLP as application/json"
            )))
        }
    }
}

/// Screen the encoding, then decode. The body is fully parsed here, before
/// the state lock is ever taken.
pub fn decode_push(headers: &HeaderMap, body: Bytes) -> Result<ExportMetricsRequest> {
    match PushEncoding::from_headers(headers)? {
        PushEncoding::Json => decode_metrics_request(body),
    }
}

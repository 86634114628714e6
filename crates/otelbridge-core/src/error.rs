//! Shared error type across otelbridge crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Push body does not decode into an OTLP metrics export.
    MalformedPayload,
    /// Push declared a content type other than JSON.
    UnsupportedEncoding,
    /// Push body exceeds the configured limit.
    PayloadTooLarge,
    /// Configuration rejected.
    InvalidConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::MalformedPayload => "MALFORMED_PAYLOAD",
            ClientCode::UnsupportedEncoding => "UNSUPPORTED_ENCODING",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::InvalidConfig => "INVALID_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            BridgeError::MalformedPayload(_) => ClientCode::MalformedPayload,
            BridgeError::UnsupportedEncoding(_) => ClientCode::UnsupportedEncoding,
            BridgeError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            BridgeError::InvalidConfig(_) => ClientCode::InvalidConfig,
            BridgeError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            BridgeError::Internal(_) => ClientCode::Internal,
        }
    }
}

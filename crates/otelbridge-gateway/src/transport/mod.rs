//! Transport layer (HTTP).
//!
//! Exposes the push/pull handlers for the metrics resource and the codec that
//! screens push encodings before any body reaches the core.

pub mod codec;
pub mod http;

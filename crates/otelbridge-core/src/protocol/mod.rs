//! Inbound wire formats.
//!
//! Only the OTLP/JSON encoding of metric exports is understood. Decoding is
//! strict about structure and lenient about absence: a field of the wrong
//! JSON type is a `MalformedPayload`, a missing field takes its default.

pub mod otlp;

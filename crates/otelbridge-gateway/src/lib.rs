//! otelbridge gateway library entry.
//!
//! This crate is the HTTP side of the bridge: it accepts OTLP/JSON pushes,
//! hands them to `otelbridge-core`, and serves the rendered exposition text to
//! pollers. It is consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;

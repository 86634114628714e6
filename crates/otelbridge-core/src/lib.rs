//! otelbridge core: OTLP/JSON metric decoding, last-value state reduction and
//! Prometheus exposition rendering.
//!
//! This crate owns the only interesting logic of the bridge. It carries no
//! transport or runtime dependencies: the gateway hands it raw push bodies and
//! asks it for rendered snapshots.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible path
//! surfaces as `BridgeError`/`Result` so a hostile push cannot take the
//! process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod ingest;
pub mod protocol;
pub mod quantity;
pub mod render;
pub mod state;

/// Shared result type.
pub use error::{BridgeError, Result};
pub use ingest::{classify, ingest, ingest_json, IngestSummary, MetricClass};
pub use quantity::{TokenType, TrackedQuantity};
pub use render::render_state;
pub use state::{MetricState, MetricStore};

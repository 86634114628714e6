//! Top-level facade crate for otelbridge.
//!
//! Re-exports the core engine and the gateway library so users can depend on a single crate.

pub mod core {
    pub use otelbridge_core::*;
}

pub mod gateway {
    pub use otelbridge_gateway::*;
}

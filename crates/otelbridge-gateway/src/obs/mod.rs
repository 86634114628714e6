//! The bridge's own counters (pushes, pulls, data points).
//!
//! These describe the bridge, not the producer: they are rendered on the ops
//! `/metrics` endpoint and never mixed into the bridged exposition.

pub mod metrics;

//! Shared application state for the bridge gateway.
//!
//! Holds the config, the process-wide `MetricStore` and the bridge's own
//! counters. Cloning is cheap; every handler gets the same store.

use std::sync::Arc;

use otelbridge_core::MetricStore;

use crate::config::BridgeConfig;
use crate::obs::metrics::BridgeMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: BridgeConfig,
    store: MetricStore,
    metrics: BridgeMetrics,
}

impl AppState {
    pub fn new(cfg: BridgeConfig) -> Self {
        Self::with_store(cfg, MetricStore::new())
    }

    /// Build state around an existing store (tests seed or inspect it).
    pub fn with_store(cfg: BridgeConfig, store: MetricStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                store,
                metrics: BridgeMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &BridgeConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> &MetricStore {
        &self.inner.store
    }

    pub fn metrics(&self) -> &BridgeMetrics {
        &self.inner.metrics
    }
}

use std::net::SocketAddr;

use serde::Deserialize;
use otelbridge_core::error::{BridgeError, Result};

/// Paths served by the ops endpoints when enabled.
pub const OPS_PATHS: [&str; 2] = ["/healthz", "/metrics"];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    pub version: u32,

    #[serde(default)]
    pub bridge: BridgeSection,

    #[serde(default)]
    pub ops: OpsSection,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            bridge: BridgeSection::default(),
            ops: OpsSection::default(),
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BridgeError::UnsupportedVersion);
        }

        self.bridge.validate()?;

        if self.ops.enabled && OPS_PATHS.contains(&self.bridge.metrics_path.as_str()) {
            return Err(BridgeError::InvalidConfig(format!(
                "bridge.metrics_path {} collides with an ops endpoint",
                self.bridge.metrics_path
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// The single resource: POST pushes, GET pulls.
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: default_metrics_path(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl BridgeSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.metrics_path.starts_with('/') || self.metrics_path.len() < 2 {
            return Err(BridgeError::InvalidConfig(
                "bridge.metrics_path must be an absolute path other than /".into(),
            ));
        }
        if !(1024..=64 * 1024 * 1024).contains(&self.max_body_bytes) {
            return Err(BridgeError::InvalidConfig(
                "bridge.max_body_bytes must be between 1024 and 67108864".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            BridgeError::InvalidConfig(format!("bridge.listen {:?} is not a socket address: {e}", self.listen))
        })
    }
}

fn default_listen() -> String {
    "127.0.0.1:4318".into()
}
fn default_metrics_path() -> String {
    "/v1/metrics".into()
}
fn default_max_body_bytes() -> usize {
    4 * 1024 * 1024
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OpsSection {
    /// Expose `/healthz` and the bridge's own counters on `/metrics`.
    #[serde(default)]
    pub enabled: bool,
}

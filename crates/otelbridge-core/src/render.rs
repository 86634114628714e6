//! Prometheus text exposition of the current state.
//!
//! Output is fixed-order so consumers can diff snapshots. The trailing
//! `# Last update:` comment is kept for existing pollers that read it.

use std::fmt::Write;

use crate::quantity::{QuantityKind, TokenType};
use crate::state::{MetricState, MetricStore};

pub const TOKEN_METRIC: &str = "claude_code_token_usage";
pub const COST_METRIC: &str = "claude_code_cost_usage";

const TOKEN_HELP: &str = "Token usage by type";
const COST_HELP: &str = "Total cost in USD";

/// `last_update` layout: local time, microsecond precision, no offset.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Render `state` as exposition text. Never fails.
pub fn render_state(state: &MetricState) -> String {
    let mut out = String::with_capacity(512);

    let _ = writeln!(out, "# HELP {TOKEN_METRIC} {TOKEN_HELP}");
    let _ = writeln!(out, "# TYPE {TOKEN_METRIC} {}", QuantityKind::Counter.as_str());
    for t in TokenType::ALL {
        let _ = writeln!(out, "{TOKEN_METRIC}{{type=\"{}\"}} {}", t.as_str(), state.tokens(t));
    }

    let _ = writeln!(out, "# HELP {COST_METRIC} {COST_HELP}");
    let _ = writeln!(out, "# TYPE {COST_METRIC} {}", QuantityKind::Gauge.as_str());
    let _ = writeln!(out, "{COST_METRIC} {}", state.cost_usd());

    let _ = writeln!(
        out,
        "# Last update: {}",
        state.last_update().format(TIMESTAMP_FORMAT)
    );
    out
}

impl MetricStore {
    /// Render a snapshot. The read lock is held only for the copy.
    pub fn render(&self) -> String {
        render_state(&self.read())
    }
}

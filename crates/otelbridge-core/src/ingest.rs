//! Ingest reducer: OTLP metric export -> last-value state.
//!
//! Pipeline:
//! 1. Walk resource -> scope -> metric in encounter order.
//! 2. Classify each metric by name (case-insensitive substring).
//! 3. Turn recognized data points into `Update`s. Nothing is summed: upstream
//!    already reports cumulative totals, so the last point for a quantity wins.
//! 4. Commit all updates plus `last_update` under one write lock.
//!
//! Steps 1-3 run without the lock; a malformed body never reaches step 4.

use bytes::Bytes;
use chrono::{DateTime, Local};

use crate::error::Result;
use crate::protocol::otlp::{decode_metrics_request, ExportMetricsRequest, Metric};
use crate::quantity::{TokenType, Update};
use crate::state::MetricStore;

/// Attribute that names the token counter a data point belongs to.
pub const TOKEN_TYPE_ATTR: &str = "token_type";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricClass {
    /// Name contains both "token" and "usage".
    Token,
    /// Name contains "cost" (and is not a token report).
    Cost,
    Ignored,
}

/// Classify a metric report by name. Matching is case-insensitive and on
/// substrings, so `claude_code.token.usage` and `TokenUsage` are both token
/// reports. The token rule is checked first.
pub fn classify(name: &str) -> MetricClass {
    let name = name.to_lowercase();
    if name.contains("token") && name.contains("usage") {
        MetricClass::Token
    } else if name.contains("cost") {
        MetricClass::Cost
    } else {
        MetricClass::Ignored
    }
}

/// What one batch did. Only used for logs and self-metrics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// `last_update` written by the commit; `None` for a plan not yet committed.
    pub committed_at: Option<DateTime<Local>>,
    pub metrics_seen: usize,
    pub token_reports: usize,
    pub cost_reports: usize,
    pub points_applied: usize,
    /// Token data points without a recognized `token_type`.
    pub points_skipped: usize,
}

/// Build the ordered list of overwrites a batch implies.
pub fn plan(req: &ExportMetricsRequest) -> (Vec<Update>, IngestSummary) {
    let mut updates = Vec::new();
    let mut summary = IngestSummary::default();

    for metric in req.metrics() {
        summary.metrics_seen += 1;
        let class = classify(&metric.name);
        tracing::debug!(metric = %metric.name, ?class, "received metric");

        match class {
            MetricClass::Token => {
                summary.token_reports += 1;
                plan_tokens(metric, &mut updates, &mut summary);
            }
            MetricClass::Cost => {
                summary.cost_reports += 1;
                plan_cost(metric, &mut updates, &mut summary);
            }
            MetricClass::Ignored => {}
        }
    }

    (updates, summary)
}

fn plan_tokens(metric: &Metric, updates: &mut Vec<Update>, summary: &mut IngestSummary) {
    for dp in metric.data_points() {
        let Some(t) = dp.string_attr(TOKEN_TYPE_ATTR).and_then(TokenType::from_attr) else {
            summary.points_skipped += 1;
            continue;
        };
        let v = dp
            .as_int
            .or(dp.as_double)
            .map(|n| n.as_i64())
            .unwrap_or(0);
        updates.push(Update::Tokens(t, v));
        summary.points_applied += 1;
    }
}

fn plan_cost(metric: &Metric, updates: &mut Vec<Update>, summary: &mut IngestSummary) {
    for dp in metric.data_points() {
        let v = dp
            .as_double
            .or(dp.as_int)
            .map(|n| n.as_f64())
            .unwrap_or(0.0);
        updates.push(Update::Cost(v));
        summary.points_applied += 1;
    }
}

/// Reduce a decoded batch into `store`.
///
/// `last_update` advances even when nothing in the batch was recognized.
pub fn ingest(store: &MetricStore, req: &ExportMetricsRequest) -> IngestSummary {
    let (updates, mut summary) = plan(req);
    for u in &updates {
        tracing::trace!(quantity = u.quantity().name(), update = ?u, "planned update");
    }
    summary.committed_at = Some(store.commit(&updates));
    summary
}

/// Decode a raw push body and reduce it into `store`.
///
/// On `MalformedPayload` the store is not touched.
pub fn ingest_json(store: &MetricStore, body: Bytes) -> Result<IngestSummary> {
    let req = decode_metrics_request(body)?;
    Ok(ingest(store, &req))
}

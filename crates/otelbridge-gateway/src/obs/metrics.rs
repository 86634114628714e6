//! In-process counters for the bridge itself.
//!
//! Counters carry dynamic labels backed by `DashMap`; label sets are sorted so
//! the same labels in a different order hit the same series. Rendering walks
//! series in sorted order so scrapes diff cleanly.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use otelbridge_core::IngestSummary;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {help}");
        let _ = writeln!(out, "# TYPE {name} counter");

        let mut series: Vec<(Vec<(String, String)>, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        series.sort();

        for (key, val) in series {
            if key.is_empty() {
                let _ = writeln!(out, "{name} {val}");
                continue;
            }
            let label_str = key
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{name}{{{label_str}}} {val}");
        }
    }
}

/// Outcome label values for `otelbridge_pushes_total`.
pub mod outcome {
    pub const ACCEPTED: &str = "accepted";
    pub const MALFORMED: &str = "malformed";
    pub const UNSUPPORTED_ENCODING: &str = "unsupported_encoding";
    pub const TOO_LARGE: &str = "too_large";
}

#[derive(Default)]
pub struct BridgeMetrics {
    pub pushes: CounterVec,
    pub pulls: CounterVec,
    pub data_points: CounterVec,
    last_ingest_unixtime: AtomicI64,
}

impl BridgeMetrics {
    /// Record a successfully reduced push. The last-ingest gauge takes the
    /// store's own `last_update` so it agrees with the snapshot.
    pub fn record_ingest(&self, summary: &IngestSummary) {
        self.pushes.inc(&[("outcome", outcome::ACCEPTED)]);
        self.data_points
            .add(&[("result", "applied")], summary.points_applied as u64);
        self.data_points
            .add(&[("result", "skipped")], summary.points_skipped as u64);
        if let Some(at) = summary.committed_at {
            self.last_ingest_unixtime
                .fetch_max(at.timestamp(), Ordering::Relaxed);
        }
    }

    pub fn record_rejected(&self, outcome: &str) {
        self.pushes.inc(&[("outcome", outcome)]);
    }

    pub fn record_pull(&self) {
        self.pulls.inc(&[]);
    }

    /// Render all counters.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.pushes
            .render("otelbridge_pushes_total", "Push requests by outcome", &mut out);
        self.pulls
            .render("otelbridge_pulls_total", "Snapshot requests served", &mut out);
        self.data_points.render(
            "otelbridge_data_points_total",
            "Token and cost data points by result",
            &mut out,
        );
        let _ = writeln!(
            out,
            "# HELP otelbridge_last_ingest_unixtime Unix time of the last accepted push\n\
             # TYPE otelbridge_last_ingest_unixtime gauge\n\
             otelbridge_last_ingest_unixtime {}",
            self.last_ingest_unixtime.load(Ordering::Relaxed)
        );
        out
    }
}

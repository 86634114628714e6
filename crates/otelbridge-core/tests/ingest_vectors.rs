//! Ingest reducer vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use otelbridge_core::{ingest_json, MetricState, MetricStore, TokenType};

mod vector_loader;
use vector_loader::load;

const OK_VECTORS: [&str; 12] = [
    "claude_code_push.json",
    "last_write_wins.json",
    "last_write_across_groups.json",
    "sum_then_gauge.json",
    "unknown_token_type.json",
    "float_only_token.json",
    "value_precedence.json",
    "cost_int_fallback.json",
    "name_classification.json",
    "missing_levels.json",
    "empty_object.json",
    "non_finite_tokens.json",
];

const ERROR_VECTORS: [&str; 6] = [
    "malformed_not_json.json",
    "malformed_empty_body.json",
    "malformed_wrong_shape.json",
    "malformed_bad_number.json",
    "malformed_null_root.json",
    "malformed_attribute_type.json",
];

#[test]
fn ok_vectors() {
    for f in OK_VECTORS {
        let v = load(f);
        assert!(v.expect_error.is_none(), "vector={}", v.description);

        let store = MetricStore::new();
        let before = store.read().last_update();
        ingest_json(&store, v.body()).unwrap_or_else(|e| panic!("vector={}: {e}", v.description));

        let ex = v.expect.expect("missing expect block");
        let s = store.read();
        assert_eq!(s.tokens(TokenType::Input), ex.input, "vector={}", v.description);
        assert_eq!(s.tokens(TokenType::Output), ex.output, "vector={}", v.description);
        assert_eq!(s.tokens(TokenType::CacheRead), ex.cache_read, "vector={}", v.description);
        assert_eq!(s.tokens(TokenType::CacheCreation), ex.cache_creation, "vector={}", v.description);
        assert_eq!(s.cost_usd(), ex.cost, "vector={}", v.description);
        assert!(s.last_update() >= before, "vector={}", v.description);
    }
}

#[test]
fn error_vectors_leave_state_untouched() {
    for f in ERROR_VECTORS {
        let v = load(f);
        let ex = v.expect_error.as_ref().expect("missing expect_error block");

        // Seed some state so "untouched" is distinguishable from "zeroed".
        let store = MetricStore::new();
        ingest_json(&store, load("claude_code_push.json").body()).unwrap();
        let before: MetricState = store.read();

        let err = ingest_json(&store, v.body()).expect_err("expected error");
        assert_eq!(err.client_code().as_str(), ex.code, "vector={}", v.description);
        assert_eq!(store.read(), before, "vector={}", v.description);
    }
}

#[test]
fn selective_overwrite_keeps_other_quantities() {
    let store = MetricStore::new();
    ingest_json(&store, load("claude_code_push.json").body()).unwrap();

    let only_output = br#"{"resourceMetrics":[{"scopeMetrics":[{"metrics":[
        {"name":"claude_code.token.usage","sum":{"dataPoints":[
            {"attributes":[{"key":"token_type","value":{"stringValue":"output"}}],"asInt":42}
        ]}}
    ]}]}]}"#;
    ingest_json(&store, bytes::Bytes::from_static(only_output)).unwrap();

    let s = store.read();
    assert_eq!(s.tokens(TokenType::Input), 100);
    assert_eq!(s.tokens(TokenType::Output), 42);
    assert_eq!(s.tokens(TokenType::CacheRead), 0);
    assert_eq!(s.tokens(TokenType::CacheCreation), 0);
    assert_eq!(s.cost_usd(), 0.0234);
}

#[test]
fn summary_counts_points() {
    let store = MetricStore::new();
    let summary = ingest_json(&store, load("unknown_token_type.json").body()).unwrap();
    assert_eq!(summary.metrics_seen, 1);
    assert_eq!(summary.token_reports, 1);
    assert_eq!(summary.cost_reports, 0);
    assert_eq!(summary.points_applied, 0);
    assert_eq!(summary.points_skipped, 5);

    let summary = ingest_json(&store, load("claude_code_push.json").body()).unwrap();
    assert_eq!(summary.metrics_seen, 2);
    assert_eq!(summary.token_reports, 1);
    assert_eq!(summary.cost_reports, 1);
    assert_eq!(summary.points_applied, 3);
    assert_eq!(summary.points_skipped, 0);
}

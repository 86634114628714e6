//! Exposition rendering and classifier tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chrono::{Local, TimeZone};

use otelbridge_core::{classify, ingest_json, render_state, MetricClass, MetricState, MetricStore};

mod vector_loader;
use vector_loader::load;

fn fixed_state() -> MetricState {
    MetricState::at(Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).single().unwrap())
}

/// Everything except the trailing timestamp comment.
fn without_timestamp(s: &str) -> Vec<&str> {
    s.lines().filter(|l| !l.starts_with("# Last update:")).collect()
}

#[test]
fn zero_state_renders_every_quantity() {
    let out = render_state(&fixed_state());
    let expected = "\
# HELP claude_code_token_usage Token usage by type
# TYPE claude_code_token_usage counter
claude_code_token_usage{type=\"input\"} 0
claude_code_token_usage{type=\"output\"} 0
claude_code_token_usage{type=\"cache_read\"} 0
claude_code_token_usage{type=\"cache_creation\"} 0
# HELP claude_code_cost_usage Total cost in USD
# TYPE claude_code_cost_usage gauge
claude_code_cost_usage 0
# Last update: 2026-01-02T03:04:05.000000
";
    assert_eq!(out, expected);
}

#[test]
fn rendering_is_idempotent() {
    let store = MetricStore::new();
    ingest_json(&store, load("claude_code_push.json").body()).unwrap();
    let a = store.render();
    let b = store.render();
    assert_eq!(without_timestamp(&a), without_timestamp(&b));
}

#[test]
fn end_to_end_push_then_pull() {
    let store = MetricStore::new();
    ingest_json(&store, load("claude_code_push.json").body()).unwrap();
    let out = store.render();
    let lines = without_timestamp(&out);

    assert!(lines.contains(&"claude_code_token_usage{type=\"input\"} 100"));
    assert!(lines.contains(&"claude_code_token_usage{type=\"output\"} 50"));
    assert!(lines.contains(&"claude_code_token_usage{type=\"cache_read\"} 0"));
    assert!(lines.contains(&"claude_code_token_usage{type=\"cache_creation\"} 0"));
    assert!(lines.contains(&"claude_code_cost_usage 0.0234"));
    assert!(out.ends_with('\n'));
    assert_eq!(out.lines().last().map(|l| l.starts_with("# Last update: ")), Some(true));
}

#[test]
fn failed_push_renders_identically() {
    let store = MetricStore::new();
    ingest_json(&store, load("claude_code_push.json").body()).unwrap();
    let before = store.render();
    assert!(ingest_json(&store, load("malformed_bad_number.json").body()).is_err());
    assert_eq!(store.render(), before);
}

#[test]
fn classifier_matches_substrings_case_insensitively() {
    assert_eq!(classify("claude_code.token.usage"), MetricClass::Token);
    assert_eq!(classify("TokenUsage"), MetricClass::Token);
    assert_eq!(classify("usage_of_tokens"), MetricClass::Token);
    assert_eq!(classify("claude_code.cost.usage"), MetricClass::Cost);
    assert_eq!(classify("COST"), MetricClass::Cost);
    // token rule wins over cost
    assert_eq!(classify("token.cost.usage"), MetricClass::Token);
    assert_eq!(classify("claude_code.token.count"), MetricClass::Ignored);
    assert_eq!(classify("claude_code.session.count"), MetricClass::Ignored);
    assert_eq!(classify(""), MetricClass::Ignored);
}

fn cost_push(value: &str) -> bytes::Bytes {
    bytes::Bytes::from(format!(
        r#"{{"resourceMetrics":[{{"scopeMetrics":[{{"metrics":[
            {{"name":"claude_code.cost.usage","gauge":{{"dataPoints":[{{"asDouble":{value}}}]}}}}
        ]}}]}}]}}"#
    ))
}

#[test]
fn non_finite_cost_renders_with_float_display() {
    let store = MetricStore::new();

    ingest_json(&store, cost_push("\"NaN\"")).unwrap();
    assert!(store.read().cost_usd().is_nan());
    assert!(store.render().contains("\nclaude_code_cost_usage NaN\n"));

    ingest_json(&store, cost_push("\"Infinity\"")).unwrap();
    assert!(store.render().contains("\nclaude_code_cost_usage inf\n"));

    ingest_json(&store, cost_push("\"-Infinity\"")).unwrap();
    assert!(store.render().contains("\nclaude_code_cost_usage -inf\n"));
}

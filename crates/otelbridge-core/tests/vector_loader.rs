//! JSON test vector loader shared by the ingest tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use bytes::Bytes;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    /// Push body given as JSON.
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
    /// Push body given verbatim (for bodies that are not JSON).
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub expect: Option<Expected>,
    #[serde(default)]
    pub expect_error: Option<ExpectError>,
}

/// Expected state after the push, starting from zero. Omitted fields are zero.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expected {
    #[serde(default)]
    pub input: i64,
    #[serde(default)]
    pub output: i64,
    #[serde(default)]
    pub cache_read: i64,
    #[serde(default)]
    pub cache_creation: i64,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Deserialize)]
pub struct ExpectError {
    pub code: String,
}

impl TestVector {
    pub fn body(&self) -> Bytes {
        match (&self.payload, &self.raw) {
            (Some(v), None) => Bytes::from(serde_json::to_vec(v).unwrap()),
            (None, Some(s)) => Bytes::from(s.clone()),
            _ => panic!("vector needs exactly one of payload/raw: {}", self.description),
        }
    }
}

pub fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

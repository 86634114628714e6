//! OTLP/JSON metrics export (`ExportMetricsServiceRequest`).
//!
//! Only the fields the reducer reads are modelled; everything else in the
//! payload (resource, scope, unit, timestamps, histograms, ...) is ignored so
//! newer producers keep working. Nesting levels that are absent decode as
//! empty.

use bytes::Bytes;
use serde::{de, Deserialize, Deserializer};

use crate::error::{BridgeError, Result};

/// Top-level push body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetricsRequest {
    #[serde(default)]
    pub resource_metrics: Vec<ResourceMetrics>,
}

impl ExportMetricsRequest {
    /// All metric reports in encounter order (resource, then scope, then metric).
    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.resource_metrics
            .iter()
            .flat_map(|r| r.scope_metrics.iter())
            .flat_map(|s| s.metrics.iter())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetrics {
    #[serde(default)]
    pub scope_metrics: Vec<ScopeMetrics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeMetrics {
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

/// One named metric report. `sum` and `gauge` are checked independently.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sum: Option<NumberData>,
    #[serde(default)]
    pub gauge: Option<NumberData>,
}

impl Metric {
    /// Data points of the sum container followed by those of the gauge container.
    pub fn data_points(&self) -> impl Iterator<Item = &NumberDataPoint> {
        self.sum
            .iter()
            .chain(self.gauge.iter())
            .flat_map(|d| d.data_points.iter())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberData {
    #[serde(default)]
    pub data_points: Vec<NumberDataPoint>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberDataPoint {
    #[serde(default)]
    pub attributes: Vec<KeyValue>,
    #[serde(default)]
    pub as_int: Option<OtlpNumber>,
    #[serde(default)]
    pub as_double: Option<OtlpNumber>,
}

impl NumberDataPoint {
    /// String value of attribute `key`.
    ///
    /// If the key repeats, the last occurrence decides, even when that
    /// occurrence carries no string value.
    pub fn string_attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|kv| kv.key == key)
            .and_then(|kv| kv.value.as_ref())
            .and_then(|v| v.string_value.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: Option<AnyValue>,
}

/// Attribute value. Non-string kinds are accepted and ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnyValue {
    #[serde(default)]
    pub string_value: Option<String>,
}

/// A data point value as it appears on the wire.
///
/// OTLP/JSON writes 64-bit integers as decimal strings, and some exporters do
/// the same for doubles (`"NaN"`, `"Infinity"`), so both JSON numbers and
/// numeric strings are accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OtlpNumber {
    Int(i64),
    Double(f64),
}

impl OtlpNumber {
    /// Integer view. Doubles truncate toward zero and saturate; NaN is 0.
    pub fn as_i64(self) -> i64 {
        match self {
            OtlpNumber::Int(i) => i,
            OtlpNumber::Double(d) => d as i64,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            OtlpNumber::Int(i) => i as f64,
            OtlpNumber::Double(d) => d,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for OtlpNumber {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawNumber::deserialize(deserializer)? {
            RawNumber::Int(i) => Ok(OtlpNumber::Int(i)),
            RawNumber::Uint(u) => Ok(i64::try_from(u)
                .map(OtlpNumber::Int)
                .unwrap_or(OtlpNumber::Double(u as f64))),
            RawNumber::Float(f) => Ok(OtlpNumber::Double(f)),
            RawNumber::Text(s) => {
                if let Ok(i) = s.parse::<i64>() {
                    Ok(OtlpNumber::Int(i))
                } else if let Ok(f) = s.parse::<f64>() {
                    Ok(OtlpNumber::Double(f))
                } else {
                    Err(de::Error::custom(format!("not a number: {s:?}")))
                }
            }
        }
    }
}

/// Decode a push body. Fails closed: anything that is not the nested export
/// shape is `MalformedPayload`.
pub fn decode_metrics_request(body: Bytes) -> Result<ExportMetricsRequest> {
    if body.is_empty() {
        return Err(BridgeError::MalformedPayload("empty body".into()));
    }
    serde_json::from_slice(&body)
        .map_err(|e| BridgeError::MalformedPayload(format!("invalid otlp json: {e}")))
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a metric records instantaneous or accumulated values.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum MetricKind {
    /// Unknown kind.
    #[default]
    #[serde(rename = "METRIC_KIND_UNSPECIFIED")]
    Unspecified,

    /// An instantaneous measurement.
    #[serde(rename = "GAUGE")]
    Gauge,

    /// A value accumulated over a time interval.
    #[serde(rename = "CUMULATIVE")]
    Cumulative,
}

impl MetricKind {
    /// Returns the wire name of the kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "METRIC_KIND_UNSPECIFIED",
            Self::Gauge => "GAUGE",
            Self::Cumulative => "CUMULATIVE",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type of a metric's values.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ValueType {
    /// Unknown value type.
    #[default]
    #[serde(rename = "VALUE_TYPE_UNSPECIFIED")]
    Unspecified,

    /// 64-bit signed integer.
    #[serde(rename = "INT64")]
    Int64,

    /// 64-bit floating point.
    #[serde(rename = "DOUBLE")]
    Double,

    /// Histogram of values.
    #[serde(rename = "DISTRIBUTION")]
    Distribution,
}

impl ValueType {
    /// Returns the wire name of the value type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "VALUE_TYPE_UNSPECIFIED",
            Self::Int64 => "INT64",
            Self::Double => "DOUBLE",
            Self::Distribution => "DISTRIBUTION",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type of a label's values.
///
/// Only string labels are produced.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum LabelValueType {
    /// A string label.
    #[default]
    #[serde(rename = "STRING")]
    String,
}

/// A label declared by a metric descriptor.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDescriptor {
    /// The label key.
    pub key: String,

    /// The type of the label's values.
    pub value_type: LabelValueType,

    /// Human-readable description of the label.
    pub description: String,
}

impl LabelDescriptor {
    /// Creates a new string-typed `LabelDescriptor`.
    pub fn string<K, D>(key: K, description: D) -> Self
    where
        K: Into<String>,
        D: Into<String>,
    {
        Self {
            key: key.into(),
            value_type: LabelValueType::String,
            description: description.into(),
        }
    }
}

/// A metric descriptor, as registered with the backend.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDescriptor {
    /// Metric type, such as `custom.googleapis.com/opencensus/request/latency`.
    #[serde(rename = "type")]
    pub metric_type: String,

    /// Human-readable description.
    pub description: String,

    /// Name shown in the UI.
    pub display_name: String,

    /// Metric kind.
    pub metric_kind: MetricKind,

    /// Value type.
    pub value_type: ValueType,

    /// Unit of the values.
    pub unit: String,

    /// Declared labels.
    pub labels: Vec<LabelDescriptor>,
}

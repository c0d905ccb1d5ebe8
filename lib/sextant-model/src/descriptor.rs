use std::fmt;

use serde::{Deserialize, Serialize};

/// Metric descriptor type.
///
/// Combines the aggregation behavior of a metric (instantaneous gauge vs. cumulative since a start time) with the type
/// of the values it records.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricDescriptorType {
    /// Unknown or unset type.
    #[default]
    Unspecified,

    /// Instantaneous integer measurement.
    GaugeInt64,

    /// Instantaneous floating-point measurement.
    GaugeDouble,

    /// Instantaneous distribution of measurements.
    GaugeDistribution,

    /// Integer measurement accumulated since a start time.
    CumulativeInt64,

    /// Floating-point measurement accumulated since a start time.
    CumulativeDouble,

    /// Distribution of measurements accumulated since a start time.
    CumulativeDistribution,

    /// Pre-computed summary (count, sum, quantiles).
    Summary,
}

impl MetricDescriptorType {
    /// Returns the name of the type as used in configuration and snapshots.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::GaugeInt64 => "gauge_int64",
            Self::GaugeDouble => "gauge_double",
            Self::GaugeDistribution => "gauge_distribution",
            Self::CumulativeInt64 => "cumulative_int64",
            Self::CumulativeDouble => "cumulative_double",
            Self::CumulativeDistribution => "cumulative_distribution",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for MetricDescriptorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label key.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct LabelKey {
    key: String,
    #[serde(default)]
    description: String,
}

impl LabelKey {
    /// Creates a new `LabelKey`.
    pub fn new<K, D>(key: K, description: D) -> Self
    where
        K: Into<String>,
        D: Into<String>,
    {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }

    /// Returns the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the description of the key.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Static metadata describing a metric.
///
/// The label keys are ordered: every time series of the metric carries its label values in the same order, so the
/// value at index `i` belongs to the key at index `i`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MetricDescriptor {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    unit: String,
    #[serde(rename = "type")]
    kind: MetricDescriptorType,
    #[serde(default)]
    label_keys: Vec<LabelKey>,
}

impl MetricDescriptor {
    /// Creates a new `MetricDescriptor`.
    pub fn new<N, D, U>(name: N, description: D, unit: U, kind: MetricDescriptorType, label_keys: Vec<LabelKey>) -> Self
    where
        N: Into<String>,
        D: Into<String>,
        U: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            unit: unit.into(),
            kind,
            label_keys,
        }
    }

    /// Returns the name of the metric.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description of the metric.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the unit of the metric.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the descriptor type.
    pub fn kind(&self) -> MetricDescriptorType {
        self.kind
    }

    /// Returns the ordered label keys.
    pub fn label_keys(&self) -> &[LabelKey] {
        &self.label_keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_type_names_match_serde() {
        let kinds = [
            MetricDescriptorType::Unspecified,
            MetricDescriptorType::GaugeInt64,
            MetricDescriptorType::GaugeDouble,
            MetricDescriptorType::GaugeDistribution,
            MetricDescriptorType::CumulativeInt64,
            MetricDescriptorType::CumulativeDouble,
            MetricDescriptorType::CumulativeDistribution,
            MetricDescriptorType::Summary,
        ];

        for kind in kinds {
            let serialized = serde_json::to_string(&kind).unwrap();
            assert_eq!(serialized, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn descriptor_defaults_optional_fields() {
        let descriptor: MetricDescriptor =
            serde_json::from_str(r#"{ "name": "request/count", "type": "cumulative_int64" }"#).unwrap();

        assert_eq!(descriptor.name(), "request/count");
        assert_eq!(descriptor.description(), "");
        assert_eq!(descriptor.unit(), "");
        assert_eq!(descriptor.kind(), MetricDescriptorType::CumulativeInt64);
        assert!(descriptor.label_keys().is_empty());
    }
}

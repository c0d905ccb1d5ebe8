use serde::{Deserialize, Serialize};

use crate::{MetricDescriptor, PointValue, Timestamp};

/// A label value.
///
/// A label value may be absent, which means the series did not record a value for the corresponding key. This is
/// distinct from an empty string.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LabelValue(Option<String>);

impl LabelValue {
    /// Creates a present label value.
    pub fn new<V: Into<String>>(value: V) -> Self {
        Self(Some(value.into()))
    }

    /// Creates an absent label value.
    pub const fn absent() -> Self {
        Self(None)
    }

    /// Returns the value, if present.
    pub fn value(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<&str> for LabelValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LabelValue {
    fn from(value: String) -> Self {
        Self(Some(value))
    }
}

impl From<Option<String>> for LabelValue {
    fn from(value: Option<String>) -> Self {
        Self(value)
    }
}

/// A single observation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Point {
    value: PointValue,
    timestamp: Timestamp,
}

impl Point {
    /// Creates a new `Point`.
    pub fn new(value: PointValue, timestamp: Timestamp) -> Self {
        Self { value, timestamp }
    }

    /// Returns the value.
    pub fn value(&self) -> &PointValue {
        &self.value
    }

    /// Returns the time at which the value was observed.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// A time series: the points recorded for one combination of label values.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TimeSeries {
    #[serde(default)]
    label_values: Vec<LabelValue>,
    #[serde(default)]
    points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_timestamp: Option<Timestamp>,
}

impl TimeSeries {
    /// Creates a new `TimeSeries` without a start timestamp.
    pub fn new(label_values: Vec<LabelValue>, points: Vec<Point>) -> Self {
        Self {
            label_values,
            points,
            start_timestamp: None,
        }
    }

    /// Sets the start timestamp.
    ///
    /// Cumulative series carry the time from which their values have been accumulated.
    pub fn with_start_timestamp(mut self, start_timestamp: Timestamp) -> Self {
        self.start_timestamp = Some(start_timestamp);
        self
    }

    /// Returns the label values, in descriptor label key order.
    pub fn label_values(&self) -> &[LabelValue] {
        &self.label_values
    }

    /// Returns the points, in recording order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the start timestamp, if any.
    pub fn start_timestamp(&self) -> Option<Timestamp> {
        self.start_timestamp
    }
}

/// A metric: its descriptor plus every time series recorded for it.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Metric {
    descriptor: MetricDescriptor,
    #[serde(default)]
    timeseries: Vec<TimeSeries>,
}

impl Metric {
    /// Creates a new `Metric`.
    pub fn new(descriptor: MetricDescriptor, timeseries: Vec<TimeSeries>) -> Self {
        Self { descriptor, timeseries }
    }

    /// Returns the descriptor.
    pub fn descriptor(&self) -> &MetricDescriptor {
        &self.descriptor
    }

    /// Returns the time series.
    pub fn timeseries(&self) -> &[TimeSeries] {
        &self.timeseries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_label_value_is_null() {
        let values: Vec<LabelValue> = serde_json::from_str(r#"["a", null, ""]"#).unwrap();
        assert_eq!(values, vec![LabelValue::new("a"), LabelValue::absent(), LabelValue::new("")]);
        assert_eq!(values[1].value(), None);
        assert_eq!(values[2].value(), Some(""));
    }

    #[test]
    fn start_timestamp_omitted_when_absent() {
        let series = TimeSeries::new(vec![], vec![]);
        let serialized = serde_json::to_value(&series).unwrap();
        assert!(serialized.get("start_timestamp").is_none());

        let series = series.with_start_timestamp(Timestamp::new(10, 0));
        let serialized = serde_json::to_value(&series).unwrap();
        assert_eq!(serialized["start_timestamp"]["seconds"], 10);
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{MetricKind, TypedValue, ValueType};

/// The monitored resource a time series is attributed to.
///
/// Resolving which resource the process runs on (a VM, a container, ...) happens elsewhere; translation passes the
/// resource through untouched.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MonitoredResource {
    /// Resource type, such as `gce_instance` or `global`.
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Resource labels.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl MonitoredResource {
    /// Creates a new `MonitoredResource`.
    pub fn new<T: Into<String>>(resource_type: T, labels: BTreeMap<String, String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            labels,
        }
    }

    /// Returns the `global` resource, which carries no labels.
    pub fn global() -> Self {
        Self::new("global", BTreeMap::new())
    }
}

/// The metric identity of a time series: its type plus label values.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Metric {
    /// Metric type, matching the registered descriptor's type.
    #[serde(rename = "type")]
    pub metric_type: String,

    /// Label values, keyed by label key.
    pub labels: BTreeMap<String, String>,
}

/// A time interval.
///
/// `start_time` is only present for cumulative metrics; gauges describe a single instant.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    /// Start of the interval, as an RFC 3339 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    /// End of the interval, as an RFC 3339 timestamp.
    pub end_time: String,
}

/// A single data point.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Point {
    /// The interval the value applies to.
    pub interval: TimeInterval,

    /// The value.
    pub value: TypedValue,
}

/// A time series, as written to the backend.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    /// Metric identity.
    pub metric: Metric,

    /// Monitored resource.
    pub resource: MonitoredResource,

    /// Metric kind.
    pub metric_kind: MetricKind,

    /// Value type.
    pub value_type: ValueType,

    /// Points, in recording order.
    pub points: Vec<Point>,
}

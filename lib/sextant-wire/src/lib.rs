//! Cloud Monitoring (v3) wire types.
//!
//! Mirrors the subset of the `google.monitoring.v3` and `google.api` schemas needed to register metric descriptors and
//! write time series. All types serialize to the JSON mapping of those messages: camelCase field names, enums as their
//! upper-case names, and `oneof` fields as a single key.
#![deny(warnings)]
#![deny(missing_docs)]

mod descriptor;
pub use self::descriptor::{LabelDescriptor, LabelValueType, MetricDescriptor, MetricKind, ValueType};

mod series;
pub use self::series::{Metric, MonitoredResource, Point, TimeInterval, TimeSeries};

mod value;
pub use self::value::{Attachment, BucketOptions, Distribution, Exemplar, ExplicitBuckets, TypedValue};


//! Vendor-neutral metrics model.
//!
//! These are the types a metrics registry hands over when it is snapshotted: descriptors describing each metric, and
//! the time series (one per label value combination) carrying the observed points. Nothing here knows about any
//! particular backend; see `sextant-translate` for the conversion into the Cloud Monitoring wire schema.
#![deny(warnings)]
#![deny(missing_docs)]

mod descriptor;
pub use self::descriptor::{LabelKey, MetricDescriptor, MetricDescriptorType};

mod series;
pub use self::series::{LabelValue, Metric, Point, TimeSeries};

mod timestamp;
pub use self::timestamp::Timestamp;

mod value;
pub use self::value::{Attachment, Bucket, BucketOptions, DistributionValue, Exemplar, PointValue, SummaryValue};

//! Translation of vendor-neutral metrics into Cloud Monitoring wire types.
//!
//! The two entry points are [`translate_descriptor`], used when registering a metric descriptor with the backend, and
//! [`translate_time_series`], used once per export cycle per metric. [`MetricTranslator`] wraps both with a loaded
//! [`TranslatorConfiguration`] and an injected [`ProcessIdentity`][sextant_identity::ProcessIdentity].
//!
//! # Semantic mismatches
//!
//! Most of the work here is mechanical field mapping, but a few spots need care:
//!
//! - distributions: the source buckets start at zero with no underflow bucket, while the backend always has an
//!   underflow bucket, so a zero bound and a zero count are prepended (see [`encode_distribution`])
//! - intervals: points carry a start time only when their series has a start timestamp, which in practice means
//!   cumulative series; gauge points only have an end time
//! - timestamps: RFC 3339 in UTC with the nanosecond fraction trimmed of trailing zeros (see [`format_timestamp`])
//! - labels: label values are positional, and must line up one-to-one with the descriptor's label keys (see
//!   [`translate_labels`])
#![deny(warnings)]
#![deny(missing_docs)]

mod config;
pub use self::config::{TranslatorConfiguration, DEFAULT_DISPLAY_NAME_PREFIX, DEFAULT_METRIC_PREFIX};

mod descriptor;
pub use self::descriptor::translate_descriptor;

mod error;
pub use self::error::TranslateError;

mod kind;
pub use self::kind::{metric_kind, value_type};

mod labels;
pub use self::labels::{translate_labels, LabelCollisionPolicy, OPENCENSUS_TASK, OPENCENSUS_TASK_DESCRIPTION};

mod path;
pub use self::path::join_path;

mod series;
pub use self::series::translate_time_series;

mod timestamp;
pub use self::timestamp::format_timestamp;

mod translator;
pub use self::translator::{MetricTranslator, TranslatedBatch};

mod value;
pub use self::value::{encode_distribution, encode_value};

/// A generic error, used where the caller is only expected to report the failure.
pub type GenericError = anyhow::Error;

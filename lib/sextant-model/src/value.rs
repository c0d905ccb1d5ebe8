use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// The value of a single point.
///
/// Which variant a point carries is dictated by the descriptor type of the owning metric: integer types carry
/// `Int64`, floating-point types carry `Double`, and so on.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointValue {
    /// An integer value.
    Int64(i64),

    /// A floating-point value.
    Double(f64),

    /// A distribution of values.
    Distribution(DistributionValue),

    /// A pre-computed summary.
    Summary(SummaryValue),
}

impl PointValue {
    /// Returns a short name for the variant, suitable for error messages.
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Self::Int64(_) => "int64",
            Self::Double(_) => "double",
            Self::Distribution(_) => "distribution",
            Self::Summary(_) => "summary",
        }
    }
}

/// Histogram bucket layout.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketOptions {
    /// Explicit, strictly increasing bucket boundaries.
    ///
    /// With `N` bounds there are `N + 1` buckets: `[0, b0)`, `[b0, b1)`, ..., `[b(N-1), +inf)`. The first bucket starts
    /// at zero; there is no underflow bucket.
    Explicit {
        /// The bucket boundaries.
        bounds: Vec<f64>,
    },
}

impl BucketOptions {
    /// Returns the explicit bucket boundaries.
    pub fn bounds(&self) -> &[f64] {
        match self {
            Self::Explicit { bounds } => bounds,
        }
    }
}

/// Extra information attached to an exemplar.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attachment {
    /// The span that was active when the exemplar was recorded.
    SpanContext {
        /// Trace identifier, hex-encoded.
        trace_id: String,

        /// Span identifier, hex-encoded.
        span_id: String,
    },

    /// Free-form text.
    Text(String),
}

/// An example value recorded into a distribution bucket.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Exemplar {
    value: f64,
    timestamp: Timestamp,
    #[serde(default)]
    attachments: BTreeMap<String, Attachment>,
}

impl Exemplar {
    /// Creates a new `Exemplar`.
    pub fn new(value: f64, timestamp: Timestamp, attachments: BTreeMap<String, Attachment>) -> Self {
        Self {
            value,
            timestamp,
            attachments,
        }
    }

    /// Returns the value of the exemplar.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the time at which the exemplar was recorded.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Returns the attachments, ordered by key.
    pub fn attachments(&self) -> &BTreeMap<String, Attachment> {
        &self.attachments
    }
}

/// A single histogram bucket.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Bucket {
    count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exemplar: Option<Exemplar>,
}

impl Bucket {
    /// Creates a new `Bucket` with the given count and no exemplar.
    pub fn new(count: u64) -> Self {
        Self { count, exemplar: None }
    }

    /// Sets the exemplar for this bucket.
    pub fn with_exemplar(mut self, exemplar: Exemplar) -> Self {
        self.exemplar = Some(exemplar);
        self
    }

    /// Returns the number of values in this bucket.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the exemplar for this bucket, if any.
    pub fn exemplar(&self) -> Option<&Exemplar> {
        self.exemplar.as_ref()
    }
}

/// A distribution of values.
///
/// `buckets` aligns one-to-one with the ranges described by `bucket_options`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DistributionValue {
    count: u64,
    sum: f64,
    #[serde(default)]
    sum_of_squared_deviation: f64,
    bucket_options: BucketOptions,
    buckets: Vec<Bucket>,
}

impl DistributionValue {
    /// Creates a new `DistributionValue`.
    pub fn new(
        count: u64, sum: f64, sum_of_squared_deviation: f64, bucket_options: BucketOptions, buckets: Vec<Bucket>,
    ) -> Self {
        Self {
            count,
            sum,
            sum_of_squared_deviation,
            bucket_options,
            buckets,
        }
    }

    /// Returns the number of values in the distribution.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the sum of all values in the distribution.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Returns the sum of squared deviations from the mean.
    pub fn sum_of_squared_deviation(&self) -> f64 {
        self.sum_of_squared_deviation
    }

    /// Returns the bucket layout.
    pub fn bucket_options(&self) -> &BucketOptions {
        &self.bucket_options
    }

    /// Returns the buckets.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }
}

/// A pre-computed summary of values.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SummaryValue {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    sum: Option<f64>,
    #[serde(default)]
    quantiles: Vec<(f64, f64)>,
}

impl SummaryValue {
    /// Creates a new `SummaryValue`.
    ///
    /// `quantiles` holds `(quantile, value)` pairs.
    pub fn new(count: Option<u64>, sum: Option<f64>, quantiles: Vec<(f64, f64)>) -> Self {
        Self { count, sum, quantiles }
    }

    /// Returns the number of values summarized, if known.
    pub fn count(&self) -> Option<u64> {
        self.count
    }

    /// Returns the sum of values summarized, if known.
    pub fn sum(&self) -> Option<f64> {
        self.sum
    }

    /// Returns the `(quantile, value)` pairs.
    pub fn quantiles(&self) -> &[(f64, f64)] {
        &self.quantiles
    }
}

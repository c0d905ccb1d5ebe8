use serde::{Deserialize, Serialize};

/// A single typed value.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TypedValue {
    /// 64-bit signed integer.
    Int64Value(i64),

    /// 64-bit floating point.
    DoubleValue(f64),

    /// Histogram of values.
    DistributionValue(Distribution),
}

/// Explicit bucket boundaries.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ExplicitBuckets {
    /// Bucket boundaries, ascending.
    pub bounds: Vec<f64>,
}

/// Histogram bucket layout.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketOptions {
    /// Explicit bucket boundaries.
    ///
    /// With `N` bounds there are `N + 1` buckets, the first being the underflow bucket `(-inf, bounds[0])`.
    pub explicit_buckets: ExplicitBuckets,
}

/// Extra information attached to an exemplar, encoded as a `google.protobuf.Any`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "@type")]
pub enum Attachment {
    /// The span active when the exemplar was recorded.
    #[serde(rename = "type.googleapis.com/google.monitoring.v3.SpanContext")]
    SpanContext {
        /// Fully qualified span name: `projects/<project>/traces/<trace>/spans/<span>`.
        #[serde(rename = "spanName")]
        span_name: String,
    },

    /// Free-form text.
    #[serde(rename = "type.googleapis.com/google.protobuf.StringValue")]
    StringValue {
        /// The text.
        value: String,
    },
}

/// An example value for a distribution bucket.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Exemplar {
    /// The value.
    pub value: f64,

    /// When the value was recorded, as an RFC 3339 timestamp.
    pub timestamp: String,

    /// Contextual information about the value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// A distribution of values.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    /// Number of values.
    pub count: u64,

    /// Arithmetic mean of the values, or zero when there are none.
    pub mean: f64,

    /// Sum of squared deviations from the mean.
    pub sum_of_squared_deviation: f64,

    /// Bucket layout.
    pub bucket_options: BucketOptions,

    /// Per-bucket counts. Has one more entry than there are bounds.
    pub bucket_counts: Vec<u64>,

    /// Example values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exemplars: Vec<Exemplar>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn typed_value_json_shape() {
        assert_eq!(
            serde_json::to_value(TypedValue::Int64Value(5)).unwrap(),
            json!({ "int64Value": 5 })
        );
        assert_eq!(
            serde_json::to_value(TypedValue::DoubleValue(1.5)).unwrap(),
            json!({ "doubleValue": 1.5 })
        );
    }

    #[test]
    fn distribution_json_shape() {
        let distribution = Distribution {
            count: 3,
            mean: 2.0,
            sum_of_squared_deviation: 2.0,
            bucket_options: BucketOptions {
                explicit_buckets: ExplicitBuckets { bounds: vec![0.0, 2.0] },
            },
            bucket_counts: vec![0, 1, 2],
            exemplars: vec![Exemplar {
                value: 1.0,
                timestamp: "1970-01-01T00:00:01Z".to_string(),
                attachments: vec![
                    Attachment::SpanContext {
                        span_name: "projects/p/traces/t/spans/s".to_string(),
                    },
                    Attachment::StringValue {
                        value: "v".to_string(),
                    },
                ],
            }],
        };

        let expected = json!({
            "distributionValue": {
                "count": 3,
                "mean": 2.0,
                "sumOfSquaredDeviation": 2.0,
                "bucketOptions": { "explicitBuckets": { "bounds": [0.0, 2.0] } },
                "bucketCounts": [0, 1, 2],
                "exemplars": [{
                    "value": 1.0,
                    "timestamp": "1970-01-01T00:00:01Z",
                    "attachments": [
                        {
                            "@type": "type.googleapis.com/google.monitoring.v3.SpanContext",
                            "spanName": "projects/p/traces/t/spans/s",
                        },
                        {
                            "@type": "type.googleapis.com/google.protobuf.StringValue",
                            "value": "v",
                        },
                    ],
                }],
            }
        });

        assert_eq!(
            serde_json::to_value(TypedValue::DistributionValue(distribution)).unwrap(),
            expected
        );
    }

    #[test]
    fn empty_exemplars_omitted() {
        let serialized = serde_json::to_value(Distribution::default()).unwrap();
        assert!(serialized.get("exemplars").is_none());
    }
}

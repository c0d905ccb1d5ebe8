use sextant_model::{Attachment, Bucket, DistributionValue, Exemplar, PointValue};
use sextant_wire::{self as wire, BucketOptions, Distribution, ExplicitBuckets, TypedValue, ValueType};
use tracing::debug;

use crate::{
    error::{InvalidBucketLayout, MismatchedValue, TranslateError, UnsupportedValueType},
    format_timestamp,
};

/// Encodes a point value as the backend's typed value.
///
/// Span context exemplar attachments are dropped, as there is no project to qualify the span name with. See
/// [`MetricTranslator`][crate::MetricTranslator] for translation with a configured project.
///
/// # Errors
///
/// If `value_type` is unspecified, [`TranslateError::UnsupportedValueType`] is returned. If the value does not hold
/// the variant matching `value_type`, [`TranslateError::MismatchedValue`] is returned.
pub fn encode_value(value_type: ValueType, value: &PointValue) -> Result<TypedValue, TranslateError> {
    encode_value_for_project(value_type, value, None)
}

pub(crate) fn encode_value_for_project(
    value_type: ValueType, value: &PointValue, project_id: Option<&str>,
) -> Result<TypedValue, TranslateError> {
    match (value_type, value) {
        (ValueType::Unspecified, _) => UnsupportedValueType { value_type }.fail(),
        (ValueType::Int64, PointValue::Int64(value)) => Ok(TypedValue::Int64Value(*value)),
        (ValueType::Double, PointValue::Double(value)) => Ok(TypedValue::DoubleValue(*value)),
        (ValueType::Distribution, PointValue::Distribution(distribution)) => {
            encode_distribution(distribution, project_id).map(TypedValue::DistributionValue)
        }
        (expected, actual) => MismatchedValue {
            expected,
            actual: actual.variant_name(),
        }
        .fail(),
    }
}

/// Encodes a distribution, rebasing its buckets onto the backend's layout.
///
/// Source buckets cover `[0, b0)`, `[b0, b1)`, and so on, while the backend's first bucket is always the underflow
/// bucket `(-inf, b0')`. A bound of `0` and a count of `0` are prepended, so `b0' = 0` and the underflow bucket is
/// empty. Both lists grow by exactly one entry.
///
/// The mean is `sum / count`, or `0` for an empty distribution. Bucket exemplars are carried over in bucket order.
///
/// # Errors
///
/// If the distribution does not have exactly one more bucket than bounds, [`TranslateError::InvalidBucketLayout`] is
/// returned. If an exemplar carries an invalid timestamp, an error is returned.
pub fn encode_distribution(
    distribution: &DistributionValue, project_id: Option<&str>,
) -> Result<Distribution, TranslateError> {
    let bounds = distribution.bucket_options().bounds();
    let buckets = distribution.buckets();
    if buckets.len() != bounds.len() + 1 {
        return InvalidBucketLayout {
            bounds: bounds.len(),
            buckets: buckets.len(),
        }
        .fail();
    }

    let mut rebased_bounds = Vec::with_capacity(bounds.len() + 1);
    rebased_bounds.push(0.0);
    rebased_bounds.extend_from_slice(bounds);

    let mut bucket_counts = Vec::with_capacity(buckets.len() + 1);
    bucket_counts.push(0);
    bucket_counts.extend(buckets.iter().map(Bucket::count));

    let count = distribution.count();
    let mean = if count > 0 {
        distribution.sum() / count as f64
    } else {
        0.0
    };

    let exemplars = buckets
        .iter()
        .filter_map(Bucket::exemplar)
        .map(|exemplar| encode_exemplar(exemplar, project_id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Distribution {
        count,
        mean,
        sum_of_squared_deviation: distribution.sum_of_squared_deviation(),
        bucket_options: BucketOptions {
            explicit_buckets: ExplicitBuckets { bounds: rebased_bounds },
        },
        bucket_counts,
        exemplars,
    })
}

fn encode_exemplar(exemplar: &Exemplar, project_id: Option<&str>) -> Result<wire::Exemplar, TranslateError> {
    Ok(wire::Exemplar {
        value: exemplar.value(),
        timestamp: format_timestamp(exemplar.timestamp())?,
        attachments: exemplar
            .attachments()
            .iter()
            .filter_map(|(key, attachment)| encode_attachment(key, attachment, project_id))
            .collect(),
    })
}

fn encode_attachment(key: &str, attachment: &Attachment, project_id: Option<&str>) -> Option<wire::Attachment> {
    match attachment {
        Attachment::SpanContext { trace_id, span_id } => match project_id {
            Some(project_id) => Some(wire::Attachment::SpanContext {
                span_name: format!("projects/{}/traces/{}/spans/{}", project_id, trace_id, span_id),
            }),
            None => {
                debug!(key, "No project ID configured. Dropping span context exemplar attachment.");
                None
            }
        },
        Attachment::Text(value) => Some(wire::Attachment::StringValue { value: value.clone() }),
    }
}

use sextant_model::MetricDescriptorType;
use sextant_wire::{MetricKind, ValueType};

/// Resolves the backend metric kind for a descriptor type.
pub const fn metric_kind(kind: MetricDescriptorType) -> MetricKind {
    match kind {
        MetricDescriptorType::GaugeInt64 | MetricDescriptorType::GaugeDouble => MetricKind::Gauge,
        MetricDescriptorType::CumulativeInt64
        | MetricDescriptorType::CumulativeDouble
        | MetricDescriptorType::CumulativeDistribution => MetricKind::Cumulative,
        // Gauge distributions have no gauge mapping and stay unspecified.
        MetricDescriptorType::GaugeDistribution | MetricDescriptorType::Unspecified | MetricDescriptorType::Summary => {
            MetricKind::Unspecified
        }
    }
}

/// Resolves the backend value type for a descriptor type.
pub const fn value_type(kind: MetricDescriptorType) -> ValueType {
    match kind {
        MetricDescriptorType::GaugeInt64 | MetricDescriptorType::CumulativeInt64 => ValueType::Int64,
        MetricDescriptorType::GaugeDouble | MetricDescriptorType::CumulativeDouble => ValueType::Double,
        MetricDescriptorType::GaugeDistribution | MetricDescriptorType::CumulativeDistribution => {
            ValueType::Distribution
        }
        MetricDescriptorType::Unspecified | MetricDescriptorType::Summary => ValueType::Unspecified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_table() {
        let cases = [
            (MetricDescriptorType::GaugeInt64, MetricKind::Gauge, ValueType::Int64),
            (MetricDescriptorType::GaugeDouble, MetricKind::Gauge, ValueType::Double),
            (
                MetricDescriptorType::GaugeDistribution,
                MetricKind::Unspecified,
                ValueType::Distribution,
            ),
            (MetricDescriptorType::CumulativeInt64, MetricKind::Cumulative, ValueType::Int64),
            (MetricDescriptorType::CumulativeDouble, MetricKind::Cumulative, ValueType::Double),
            (
                MetricDescriptorType::CumulativeDistribution,
                MetricKind::Cumulative,
                ValueType::Distribution,
            ),
            (MetricDescriptorType::Summary, MetricKind::Unspecified, ValueType::Unspecified),
            (MetricDescriptorType::Unspecified, MetricKind::Unspecified, ValueType::Unspecified),
        ];

        for (kind, expected_metric_kind, expected_value_type) in cases {
            assert_eq!(metric_kind(kind), expected_metric_kind, "metric kind for {}", kind);
            assert_eq!(value_type(kind), expected_value_type, "value type for {}", kind);
        }
    }

    #[test]
    fn gauge_distribution_is_not_a_gauge() {
        // Gauge distributions are registered with an unspecified metric kind, not GAUGE.
        assert_eq!(metric_kind(MetricDescriptorType::GaugeDistribution), MetricKind::Unspecified);
        assert_eq!(value_type(MetricDescriptorType::GaugeDistribution), ValueType::Distribution);
    }
}

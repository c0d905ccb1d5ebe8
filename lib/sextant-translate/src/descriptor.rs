use sextant_model::MetricDescriptor;
use sextant_wire::{self as wire, LabelDescriptor};

use crate::{join_path, labels::identity_label_descriptor, metric_kind, value_type};

/// Translates a metric descriptor into the form registered with the backend.
///
/// The metric type is `type_prefix` joined with the descriptor name, and the display name is `display_name_prefix`
/// joined with the descriptor name. Every declared label key becomes a string label descriptor, in order, followed by
/// the process identity label descriptor.
///
/// This does not check the declared label keys against the identity label key. Use
/// [`MetricTranslator::translate_descriptor`][crate::MetricTranslator::translate_descriptor] to apply the configured
/// collision policy.
pub fn translate_descriptor(
    descriptor: &MetricDescriptor, type_prefix: &str, display_name_prefix: &str,
) -> wire::MetricDescriptor {
    let labels = descriptor
        .label_keys()
        .iter()
        .map(|key| LabelDescriptor::string(key.key(), key.description()))
        .chain(std::iter::once(identity_label_descriptor()))
        .collect();

    wire::MetricDescriptor {
        metric_type: join_path([type_prefix, descriptor.name()]),
        description: descriptor.description().to_string(),
        display_name: join_path([display_name_prefix, descriptor.name()]),
        metric_kind: metric_kind(descriptor.kind()),
        value_type: value_type(descriptor.kind()),
        unit: descriptor.unit().to_string(),
        labels,
    }
}

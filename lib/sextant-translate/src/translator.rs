use anyhow::Context as _;
use serde::Serialize;
use sextant_identity::ProcessIdentity;
use sextant_model::{Metric, MetricDescriptor};
use sextant_wire::{self as wire, MonitoredResource};
use tracing::debug;

use crate::{
    labels::check_identity_collision, series::SeriesTranslator, translate_descriptor, GenericError, TranslateError,
    TranslatorConfiguration, OPENCENSUS_TASK,
};

/// Translator bound to a configuration and a process identity.
///
/// Applies the configured prefixes, label collision policy, and exemplar project to every translation.
#[derive(Clone, Debug)]
pub struct MetricTranslator {
    config: TranslatorConfiguration,
    identity: ProcessIdentity,
}

impl MetricTranslator {
    /// Creates a new `MetricTranslator`.
    pub fn new(config: TranslatorConfiguration, identity: ProcessIdentity) -> Self {
        Self { config, identity }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TranslatorConfiguration {
        &self.config
    }

    /// Returns the process identity stamped onto every time series.
    pub fn identity(&self) -> &ProcessIdentity {
        &self.identity
    }

    /// Translates a metric descriptor.
    ///
    /// Under the [`Overwrite`][crate::LabelCollisionPolicy::Overwrite] policy, a declared label with the identity label
    /// key is left out, so the descriptor carries exactly one identity label descriptor.
    ///
    /// # Errors
    ///
    /// If the descriptor declares the identity label key and the collision policy is
    /// [`Reject`][crate::LabelCollisionPolicy::Reject], an error is returned.
    pub fn translate_descriptor(&self, descriptor: &MetricDescriptor) -> Result<wire::MetricDescriptor, TranslateError> {
        check_identity_collision(descriptor.label_keys(), self.config.label_collision_policy())?;

        let mut translated = translate_descriptor(
            descriptor,
            self.config.metric_prefix(),
            self.config.display_name_prefix(),
        );

        // The identity label descriptor is always last. Any earlier declaration of the same key is shadowed by it.
        if let Some(identity_label) = translated.labels.pop() {
            translated.labels.retain(|label| label.key != OPENCENSUS_TASK);
            translated.labels.push(identity_label);
        }

        Ok(translated)
    }

    /// Translates the time series of a metric.
    ///
    /// # Errors
    ///
    /// If any series or point fails to translate, an error is returned.
    pub fn translate_time_series(
        &self, metric: &Metric, resource: &MonitoredResource,
    ) -> Result<Vec<wire::TimeSeries>, TranslateError> {
        self.series_translator().translate(metric, resource)
    }

    /// Translates a snapshot of metrics: one descriptor per metric, plus all of their time series.
    ///
    /// # Errors
    ///
    /// Translation stops at the first metric that fails, and the error names that metric.
    pub fn translate_metrics(
        &self, metrics: &[Metric], resource: &MonitoredResource,
    ) -> Result<TranslatedBatch, GenericError> {
        let mut batch = TranslatedBatch::default();
        let series_translator = self.series_translator();

        for metric in metrics {
            let name = metric.descriptor().name();

            let descriptor = self
                .translate_descriptor(metric.descriptor())
                .with_context(|| format!("Failed to translate descriptor for metric '{}'.", name))?;
            let time_series = series_translator
                .translate(metric, resource)
                .with_context(|| format!("Failed to translate time series for metric '{}'.", name))?;

            batch.descriptors.push(descriptor);
            batch.time_series.extend(time_series);
        }

        debug!(
            descriptors_len = batch.descriptors.len(),
            time_series_len = batch.time_series.len(),
            "Translated metrics snapshot."
        );

        Ok(batch)
    }

    fn series_translator(&self) -> SeriesTranslator<'_> {
        SeriesTranslator {
            type_prefix: self.config.metric_prefix(),
            identity: &self.identity,
            collision_policy: self.config.label_collision_policy(),
            project_id: self.config.project_id(),
        }
    }
}

/// The result of translating a snapshot of metrics.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedBatch {
    /// Metric descriptors, one per metric, in snapshot order.
    pub descriptors: Vec<wire::MetricDescriptor>,

    /// Time series of all metrics, in snapshot order.
    pub time_series: Vec<wire::TimeSeries>,
}

use sextant_identity::ProcessIdentity;
use sextant_model::{Metric, TimeSeries};
use sextant_wire::{self as wire, MonitoredResource, TimeInterval};
use tracing::trace;

use crate::{
    format_timestamp, join_path, metric_kind, translate_labels, value::encode_value_for_project, value_type,
    LabelCollisionPolicy, TranslateError,
};

/// Translates every time series of a metric into backend time series.
///
/// Each source series produces exactly one backend series, in order, whose points appear in the same order as the
/// source points. Every point carries its timestamp as the interval end time; the series' start timestamp, when it has
/// one, becomes the start time of every point.
///
/// Labels are translated with the default [`LabelCollisionPolicy`] and exemplar span contexts are dropped. See
/// [`MetricTranslator`][crate::MetricTranslator] for translation with a loaded configuration.
///
/// # Errors
///
/// If any series or point fails to translate, the error is returned and nothing is produced for the metric.
pub fn translate_time_series(
    metric: &Metric, resource: &MonitoredResource, type_prefix: &str, identity: &ProcessIdentity,
) -> Result<Vec<wire::TimeSeries>, TranslateError> {
    SeriesTranslator {
        type_prefix,
        identity,
        collision_policy: LabelCollisionPolicy::default(),
        project_id: None,
    }
    .translate(metric, resource)
}

/// Time series translation with every knob exposed.
pub(crate) struct SeriesTranslator<'a> {
    pub type_prefix: &'a str,
    pub identity: &'a ProcessIdentity,
    pub collision_policy: LabelCollisionPolicy,
    pub project_id: Option<&'a str>,
}

impl SeriesTranslator<'_> {
    pub fn translate(
        &self, metric: &Metric, resource: &MonitoredResource,
    ) -> Result<Vec<wire::TimeSeries>, TranslateError> {
        let descriptor = metric.descriptor();
        let metric_type = join_path([self.type_prefix, descriptor.name()]);
        let metric_kind = metric_kind(descriptor.kind());
        let value_type = value_type(descriptor.kind());

        trace!(
            metric = descriptor.name(),
            %metric_kind,
            %value_type,
            series_len = metric.timeseries().len(),
            "Translating time series."
        );

        metric
            .timeseries()
            .iter()
            .map(|series| {
                let labels = translate_labels(
                    descriptor.label_keys(),
                    series.label_values(),
                    self.identity,
                    self.collision_policy,
                )?;

                Ok(wire::TimeSeries {
                    metric: wire::Metric {
                        metric_type: metric_type.clone(),
                        labels,
                    },
                    resource: resource.clone(),
                    metric_kind,
                    value_type,
                    points: self.translate_points(series, value_type)?,
                })
            })
            .collect()
    }

    fn translate_points(
        &self, series: &TimeSeries, value_type: wire::ValueType,
    ) -> Result<Vec<wire::Point>, TranslateError> {
        let start_time = series.start_timestamp().map(format_timestamp).transpose()?;

        series
            .points()
            .iter()
            .map(|point| {
                Ok(wire::Point {
                    interval: TimeInterval {
                        start_time: start_time.clone(),
                        end_time: format_timestamp(point.timestamp())?,
                    },
                    value: encode_value_for_project(value_type, point.value(), self.project_id)?,
                })
            })
            .collect()
    }
}

use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;
use sextant_model::Metric;
use sextant_wire::MonitoredResource;
use tracing::debug;

/// A point-in-time snapshot of every metric held by a registry.
#[derive(Deserialize)]
pub struct Snapshot {
    /// Resource the metrics are attributed to.
    #[serde(default = "MonitoredResource::global")]
    pub resource: MonitoredResource,

    /// Metrics, in registry order.
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl Snapshot {
    /// Reads a snapshot from the given JSON file.
    pub fn try_from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file '{}'.", path.display()))?;
        let snapshot: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse snapshot file '{}'.", path.display()))?;

        debug!(
            file_path = %path.display(),
            resource_type = %snapshot.resource.resource_type,
            metrics_len = snapshot.metrics.len(),
            "Loaded metrics snapshot."
        );

        Ok(snapshot)
    }
}

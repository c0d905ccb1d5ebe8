use serde::{Deserialize, Deserializer, Serialize};
use sextant_config::GenericConfiguration;

use crate::{GenericError, LabelCollisionPolicy};

/// Default prefix for metric types.
pub const DEFAULT_METRIC_PREFIX: &str = "custom.googleapis.com/opencensus";

/// Default prefix for metric display names.
pub const DEFAULT_DISPLAY_NAME_PREFIX: &str = "OpenCensus";

fn default_metric_prefix() -> String {
    DEFAULT_METRIC_PREFIX.to_owned()
}

fn default_display_name_prefix() -> String {
    DEFAULT_DISPLAY_NAME_PREFIX.to_owned()
}

/// A string value that a configuration source may have parsed as a scalar.
///
/// Environment variables are parsed before deserialization, so `SEXTANT_PROJECT_ID=123456789` arrives as an integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringLike {
    String(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl From<StringLike> for String {
    fn from(value: StringLike) -> Self {
        match value {
            StringLike::String(value) => value,
            StringLike::Unsigned(value) => value.to_string(),
            StringLike::Signed(value) => value.to_string(),
            StringLike::Float(value) => value.to_string(),
            StringLike::Bool(value) => value.to_string(),
        }
    }
}

fn deserialize_string_like<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    StringLike::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_string_like<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<StringLike>::deserialize(deserializer).map(|value| value.map(String::from))
}

/// Translator configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TranslatorConfiguration {
    /// Prefix joined with each descriptor name to form the metric type.
    ///
    /// Defaults to `custom.googleapis.com/opencensus`.
    #[serde(default = "default_metric_prefix", deserialize_with = "deserialize_string_like")]
    metric_prefix: String,

    /// Prefix joined with each descriptor name to form the display name.
    ///
    /// Defaults to `OpenCensus`.
    #[serde(default = "default_display_name_prefix", deserialize_with = "deserialize_string_like")]
    display_name_prefix: String,

    /// What to do when a descriptor declares the process identity label key itself.
    ///
    /// Defaults to `overwrite`.
    #[serde(default)]
    label_collision_policy: LabelCollisionPolicy,

    /// Project that exemplar span contexts are attributed to.
    ///
    /// Span context attachments need a project to form a span name, so they are dropped when this is not set.
    ///
    /// Defaults to unset.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string_like",
        skip_serializing_if = "Option::is_none"
    )]
    project_id: Option<String>,
}

impl TranslatorConfiguration {
    /// Creates a new `TranslatorConfiguration` from the given configuration.
    pub fn from_configuration(config: &GenericConfiguration) -> Result<Self, GenericError> {
        Ok(config.as_typed()?)
    }

    /// Sets the metric type prefix.
    pub fn with_metric_prefix<S: Into<String>>(mut self, metric_prefix: S) -> Self {
        self.metric_prefix = metric_prefix.into();
        self
    }

    /// Sets the display name prefix.
    pub fn with_display_name_prefix<S: Into<String>>(mut self, display_name_prefix: S) -> Self {
        self.display_name_prefix = display_name_prefix.into();
        self
    }

    /// Sets the label collision policy.
    pub fn with_label_collision_policy(mut self, policy: LabelCollisionPolicy) -> Self {
        self.label_collision_policy = policy;
        self
    }

    /// Sets the project that exemplar span contexts are attributed to.
    pub fn with_project_id<S: Into<String>>(mut self, project_id: S) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Returns the metric type prefix.
    pub fn metric_prefix(&self) -> &str {
        &self.metric_prefix
    }

    /// Returns the display name prefix.
    pub fn display_name_prefix(&self) -> &str {
        &self.display_name_prefix
    }

    /// Returns the label collision policy.
    pub fn label_collision_policy(&self) -> LabelCollisionPolicy {
        self.label_collision_policy
    }

    /// Returns the project that exemplar span contexts are attributed to, if any.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }
}

impl Default for TranslatorConfiguration {
    fn default() -> Self {
        Self {
            metric_prefix: default_metric_prefix(),
            display_name_prefix: default_display_name_prefix(),
            label_collision_policy: LabelCollisionPolicy::default(),
            project_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use sextant_config::ConfigurationLoader;
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn defaults_from_empty_configuration() {
        let config = ConfigurationLoader::default().into_generic();
        let translator_config = TranslatorConfiguration::from_configuration(&config).unwrap();

        assert_eq!(translator_config, TranslatorConfiguration::default());
        assert_eq!(translator_config.metric_prefix(), DEFAULT_METRIC_PREFIX);
        assert_eq!(translator_config.display_name_prefix(), DEFAULT_DISPLAY_NAME_PREFIX);
        assert_eq!(translator_config.label_collision_policy(), LabelCollisionPolicy::Overwrite);
        assert_eq!(translator_config.project_id(), None);
    }

    #[test]
    fn from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "metric_prefix: external.googleapis.com/prom\nlabel_collision_policy: reject\nproject_id: my-project"
        )
        .unwrap();

        let config = ConfigurationLoader::default()
            .from_yaml(file.path())
            .unwrap()
            .into_generic();
        let translator_config = TranslatorConfiguration::from_configuration(&config).unwrap();

        assert_eq!(
            translator_config,
            TranslatorConfiguration::default()
                .with_metric_prefix("external.googleapis.com/prom")
                .with_label_collision_policy(LabelCollisionPolicy::Reject)
                .with_project_id("my-project")
        );
    }

    #[test]
    fn numeric_project_id_from_environment() {
        std::env::set_var("SEXTANTNUMERICTEST_PROJECT_ID", "123456789");
        std::env::set_var("SEXTANTNUMERICTEST_DISPLAY_NAME_PREFIX", "2024");

        let config = ConfigurationLoader::default()
            .with_defaults(TranslatorConfiguration::default())
            .from_environment("SEXTANTNUMERICTEST")
            .unwrap()
            .into_generic();
        let translator_config = TranslatorConfiguration::from_configuration(&config);

        std::env::remove_var("SEXTANTNUMERICTEST_PROJECT_ID");
        std::env::remove_var("SEXTANTNUMERICTEST_DISPLAY_NAME_PREFIX");

        let translator_config = translator_config.unwrap();
        assert_eq!(translator_config.project_id(), Some("123456789"));
        assert_eq!(translator_config.display_name_prefix(), "2024");
        assert_eq!(translator_config.metric_prefix(), DEFAULT_METRIC_PREFIX);
    }

    #[test]
    fn numeric_project_id_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "project_id: 987654321").unwrap();

        let config = ConfigurationLoader::default()
            .from_yaml(file.path())
            .unwrap()
            .into_generic();
        let translator_config = TranslatorConfiguration::from_configuration(&config).unwrap();

        assert_eq!(translator_config.project_id(), Some("987654321"));
    }

    #[test]
    fn invalid_policy_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "label_collision_policy: ignore").unwrap();

        let config = ConfigurationLoader::default()
            .from_yaml(file.path())
            .unwrap()
            .into_generic();
        assert!(TranslatorConfiguration::from_configuration(&config).is_err());
    }
}

//! Layered configuration loading.
//!
//! Configuration is assembled from YAML files, JSON files, and prefixed environment variables, in the order the
//! sources are added to a [`ConfigurationLoader`]: later sources take precedence over earlier ones. The merged result
//! can be deserialized wholesale into a typed value, or queried key by key through a [`GenericConfiguration`].
#![deny(warnings)]
#![deny(missing_docs)]

use std::{
    borrow::Cow,
    collections::HashSet,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use figment::{
    error::Kind,
    providers::{Env, Format as _, Json, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt as _, Snafu};
use tracing::debug;

/// A configuration error.
#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)))]
pub enum ConfigurationError {
    /// Environment variable prefix was empty.
    #[snafu(display("Environment variable prefix must not be empty."))]
    EmptyPrefix,

    /// A configuration file could not be read.
    #[snafu(display("Failed to read configuration file '{}'.", path.display()))]
    ReadFile {
        /// Path of the file.
        path: PathBuf,

        /// Error source.
        source: io::Error,
    },

    /// Requested field was missing from the configuration.
    #[snafu(display("Missing field '{}' in configuration. {}", field, help_text))]
    MissingField {
        /// Help text describing how to set the missing field.
        help_text: String,

        /// Name of the missing field.
        field: Cow<'static, str>,
    },

    /// Requested field did not have the expected data type.
    #[snafu(display(
        "Expected value for field '{}' to be '{}', got '{}' instead.",
        field,
        expected_ty,
        actual_ty
    ))]
    InvalidFieldType {
        /// Period-separated path to the field.
        field: String,

        /// Expected data type.
        expected_ty: String,

        /// Actual data type.
        actual_ty: String,
    },

    /// Any other error from parsing or extracting configuration.
    #[snafu(display("Failed to load configuration: {}", source))]
    Generic {
        /// Error source.
        source: figment::Error,
    },
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
enum LookupSource {
    Environment { prefix: String },
}

impl LookupSource {
    fn transform_key(&self, key: &str) -> String {
        match self {
            // The prefix is already uppercased and ends with an underscore.
            LookupSource::Environment { prefix } => format!("{}{}", prefix, key.replace('.', "_").to_uppercase()),
        }
    }
}

/// A configuration loader that can pull from various sources.
///
/// # Supported sources
///
/// - serialized defaults ([`with_defaults`][Self::with_defaults])
/// - YAML file
/// - JSON file
/// - environment variables (must be prefixed; see [`from_environment`][Self::from_environment])
pub struct ConfigurationLoader {
    lookup_sources: HashSet<LookupSource>,
    figment: Figment,
}

impl Default for ConfigurationLoader {
    fn default() -> Self {
        Self {
            lookup_sources: HashSet::new(),
            figment: Figment::new(),
        }
    }
}

impl ConfigurationLoader {
    /// Adds the given value as the lowest-priority source.
    ///
    /// Useful for seeding defaults that any other source may override.
    pub fn with_defaults<T: Serialize>(mut self, defaults: T) -> Self {
        self.figment = Figment::from(Serialized::defaults(defaults)).admerge(self.figment);
        self
    }

    /// Loads the given YAML configuration file.
    ///
    /// # Errors
    ///
    /// If the file could not be read, or if the file is not valid YAML, an error will be returned.
    pub fn from_yaml<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigurationError> {
        let contents = read_file(path.as_ref())?;
        let provider = Yaml::string(&contents);
        figment::Provider::data(&provider).context(Generic)?;

        self.figment = self.figment.admerge(provider);
        Ok(self)
    }

    /// Attempts to load the given YAML configuration file, ignoring any errors.
    pub fn try_from_yaml<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        let fallback = Self {
            lookup_sources: self.lookup_sources.clone(),
            figment: self.figment.clone(),
        };

        match self.from_yaml(path) {
            Ok(loader) => loader,
            Err(e) => {
                debug!(error = %e, file_path = %path.display(), "Unable to read YAML configuration file. Ignoring.");
                fallback
            }
        }
    }

    /// Loads the given JSON configuration file.
    ///
    /// # Errors
    ///
    /// If the file could not be read, or if the file is not valid JSON, an error will be returned.
    pub fn from_json<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigurationError> {
        let contents = read_file(path.as_ref())?;
        let provider = Json::string(&contents);
        figment::Provider::data(&provider).context(Generic)?;

        self.figment = self.figment.admerge(provider);
        Ok(self)
    }

    /// Loads configuration from environment variables.
    ///
    /// The prefix is case-insensitive, and has an underscore appended if it does not already end with one: with a
    /// prefix of `sextant`, `SEXTANT_METRIC_PREFIX` maps to the `metric_prefix` key.
    ///
    /// # Errors
    ///
    /// If the prefix is empty, an error will be returned.
    pub fn from_environment(mut self, prefix: &str) -> Result<Self, ConfigurationError> {
        if prefix.is_empty() {
            return Err(ConfigurationError::EmptyPrefix);
        }

        let mut prefix = prefix.to_uppercase();
        if !prefix.ends_with('_') {
            prefix.push('_');
        }

        self.figment = self.figment.admerge(Env::prefixed(&prefix));
        self.lookup_sources.insert(LookupSource::Environment { prefix });
        Ok(self)
    }

    /// Consumes the loader, deserializing the merged configuration as `T`.
    ///
    /// # Errors
    ///
    /// If the configuration could not be deserialized into `T`, an error will be returned.
    pub fn into_typed<'a, T: Deserialize<'a>>(self) -> Result<T, ConfigurationError> {
        self.into_generic().as_typed()
    }

    /// Consumes the loader and wraps the merged configuration in a generic wrapper.
    pub fn into_generic(self) -> GenericConfiguration {
        GenericConfiguration {
            inner: Arc::new(Inner {
                figment: self.figment,
                lookup_sources: self.lookup_sources,
            }),
        }
    }
}

fn read_file(path: &Path) -> Result<String, ConfigurationError> {
    std::fs::read_to_string(path).context(ReadFile { path })
}

#[derive(Debug)]
struct Inner {
    figment: Figment,
    lookup_sources: HashSet<LookupSource>,
}

/// A generic configuration object.
///
/// Values can be queried by key, where keys take the form `a.b.c` with periods indicating nesting, or the whole
/// configuration can be deserialized at once.
#[derive(Clone, Debug)]
pub struct GenericConfiguration {
    inner: Arc<Inner>,
}

impl GenericConfiguration {
    fn get<'a, T: Deserialize<'a>>(&self, key: &str) -> Result<T, ConfigurationError> {
        match self.inner.figment.extract_inner(key) {
            Ok(value) => Ok(value),
            Err(e) if matches!(e.kind, Kind::MissingField(_)) => {
                // Environment variables flatten nesting with underscores, so `a.b` may only exist as `a_b`.
                let fallback_key = key.replace('.', "_");
                self.inner
                    .figment
                    .extract_inner(&fallback_key)
                    .map_err(|fallback_e| from_figment_error(&self.inner.lookup_sources, fallback_e))
            }
            Err(e) => Err(from_figment_error(&self.inner.lookup_sources, e)),
        }
    }

    /// Gets a configuration value by key.
    ///
    /// # Errors
    ///
    /// If the key does not exist, or the value could not be deserialized into `T`, an error will be returned.
    pub fn get_typed<'a, T: Deserialize<'a>>(&self, key: &str) -> Result<T, ConfigurationError> {
        self.get(key)
    }

    /// Gets a configuration value by key, or the default value of `T` if the key is missing or invalid.
    pub fn get_typed_or_default<'a, T: Default + Deserialize<'a>>(&self, key: &str) -> T {
        self.get(key).unwrap_or_default()
    }

    /// Gets a configuration value by key, if it exists.
    ///
    /// # Errors
    ///
    /// If the key exists but the value could not be deserialized into `T`, an error will be returned.
    pub fn try_get_typed<'a, T: Deserialize<'a>>(&self, key: &str) -> Result<Option<T>, ConfigurationError> {
        match self.get(key) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigurationError::MissingField { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Deserializes the entire configuration as `T`.
    ///
    /// # Errors
    ///
    /// If the configuration could not be deserialized into `T`, an error will be returned.
    pub fn as_typed<'a, T: Deserialize<'a>>(&self) -> Result<T, ConfigurationError> {
        self.inner
            .figment
            .extract()
            .map_err(|e| from_figment_error(&self.inner.lookup_sources, e))
    }
}

fn from_figment_error(lookup_sources: &HashSet<LookupSource>, e: figment::Error) -> ConfigurationError {
    match e.kind {
        Kind::MissingField(field) => {
            let mut valid_keys = lookup_sources
                .iter()
                .map(|source| source.transform_key(&field))
                .collect::<Vec<_>>();
            valid_keys.insert(0, field.to_string());

            let help_text = format!("Try setting `{}`.", valid_keys.join("` or `"));
            ConfigurationError::MissingField { help_text, field }
        }
        Kind::InvalidType(actual_ty, expected_ty) => ConfigurationError::InvalidFieldType {
            field: e.path.join("."),
            expected_ty,
            actual_ty: actual_ty.to_string(),
        },
        _ => ConfigurationError::Generic { source: e },
    }
}

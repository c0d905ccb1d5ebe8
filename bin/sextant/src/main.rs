//! Metrics snapshot translator.
//!
//! Reads a snapshot of vendor-neutral metrics from disk, translates it into the Cloud Monitoring wire schema, and
//! writes the resulting descriptors and time series to stdout as JSON. Logs go to stderr.

#![deny(warnings)]
#![deny(missing_docs)]

use std::io::Write as _;

use anyhow::Context as _;
use clap::Parser as _;
use sextant_config::ConfigurationLoader;
use sextant_identity::ProcessIdentity;
use sextant_translate::{GenericError, MetricTranslator, TranslatorConfiguration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
use self::config::{Action, Cli, TranslateConfig};

mod snapshot;
use self::snapshot::Snapshot;

const ENV_PREFIX: &str = "SEXTANT";

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(cli.log_level().into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .init();

    if let Err(e) = run(cli) {
        error!("{:?}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GenericError> {
    match cli.action {
        Action::Translate(config) => translate(config),
        Action::Identity => {
            println!("{}", ProcessIdentity::global());
            Ok(())
        }
    }
}

fn translate(config: TranslateConfig) -> Result<(), GenericError> {
    let translator_config = load_configuration(&config)?;
    let snapshot = Snapshot::try_from_file(&config.snapshot)?;

    let translator = MetricTranslator::new(translator_config, ProcessIdentity::global().clone());
    let batch = translator.translate_metrics(&snapshot.metrics, &snapshot.resource)?;

    info!(
        descriptors_len = batch.descriptors.len(),
        time_series_len = batch.time_series.len(),
        "Translated metrics snapshot."
    );

    let mut stdout = std::io::stdout().lock();
    if config.pretty {
        serde_json::to_writer_pretty(&mut stdout, &batch)?;
    } else {
        serde_json::to_writer(&mut stdout, &batch)?;
    }
    writeln!(stdout).context("Failed to write payload.")?;

    Ok(())
}

fn load_configuration(config: &TranslateConfig) -> Result<TranslatorConfiguration, GenericError> {
    let mut loader = ConfigurationLoader::default().with_defaults(TranslatorConfiguration::default());
    if let Some(config_path) = &config.config {
        loader = loader
            .from_yaml(config_path)
            .with_context(|| format!("Failed to load configuration file '{}'.", config_path.display()))?;
    }

    let configuration = loader.from_environment(ENV_PREFIX)?.into_generic();
    let translator_config = TranslatorConfiguration::from_configuration(&configuration)?;

    info!(
        metric_prefix = translator_config.metric_prefix(),
        display_name_prefix = translator_config.display_name_prefix(),
        project_id = translator_config.project_id().unwrap_or("<unset>"),
        "Loaded translator configuration."
    );

    Ok(translator_config)
}

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(about)]
pub struct Cli {
    /// Enable verbose output. (Specify twice for more verbosity.)
    #[arg(global = true, short = 'v', long, action = ArgAction::Count, default_value_t = 0)]
    verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub action: Action,
}

impl Cli {
    /// Gets the configured log level based on the user-supplied verbosity level.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

#[derive(Subcommand)]
pub enum Action {
    /// Translate a metrics snapshot into a Cloud Monitoring payload.
    Translate(TranslateConfig),

    /// Print the identity stamped onto time series written by this process.
    Identity,
}

/// Snapshot translation configuration.
#[derive(Args, Clone)]
pub struct TranslateConfig {
    /// Path to the metrics snapshot to translate.
    ///
    /// The snapshot is a JSON object holding the monitored `resource` and the list of `metrics` to translate.
    #[arg(short = 's', long)]
    pub snapshot: PathBuf,

    /// Path to the translator configuration file to use.
    ///
    /// Values can also be set, or overridden, with `SEXTANT_`-prefixed environment variables, such as
    /// `SEXTANT_METRIC_PREFIX`.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Pretty-print the payload.
    #[arg(short = 'p', long)]
    pub pretty: bool,
}

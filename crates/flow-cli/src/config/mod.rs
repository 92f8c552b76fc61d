//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── format: OutputFormat      # Text or JSON output
//! ├── catalog: CatalogArgs      # Extra integrations
//! └── command: Command
//!     ├── inspect: InspectArgs  # Definition file and graph policies
//!     └── integrations
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod catalog;
mod graph;

use std::path::PathBuf;
use std::process;

pub use catalog::CatalogArgs;
use clap::{Args, Parser, Subcommand, ValueEnum};
pub use graph::GraphArgs;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "flow")]
#[command(about = "Inspect and validate Flow workflow definitions")]
#[command(version)]
pub struct Cli {
    /// Output format for reports and listings.
    #[arg(
        long,
        env = "FLOW_OUTPUT_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Text,
        global = true
    )]
    pub format: OutputFormat,

    /// Integration catalog configuration.
    #[clap(flatten)]
    pub catalog: CatalogArgs,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load a workflow definition and print a structural report.
    Inspect(InspectArgs),
    /// List the integrations workflow nodes can bind to.
    Integrations,
}

/// Arguments of the `inspect` command.
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to a workflow definition (JSON).
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Graph policies applied while loading.
    #[clap(flatten)]
    pub graph: GraphArgs,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments so that its
    /// variables act as defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// Logs go to stderr so that stdout only carries command output.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Command::Inspect(args) = &self.command {
            args.graph.validate()?;
        }
        Ok(())
    }

    /// Logs configuration at debug level.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            format = ?self.format,
            catalog = ?self.catalog.path,
            "CLI configuration"
        );

        if let Command::Inspect(args) = &self.command {
            args.graph.log();
        }
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_inspect() {
        let cli = Cli::try_parse_from([
            "flow",
            "inspect",
            "workflow.json",
            "--allow-cycles",
            "--max-nodes",
            "8",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        let Command::Inspect(args) = cli.command else {
            panic!("expected inspect command");
        };
        assert_eq!(args.path, PathBuf::from("workflow.json"));
        assert!(args.graph.allow_cycles);
        assert_eq!(args.graph.max_nodes, Some(8));
    }

    #[test]
    fn test_parse_integrations() {
        let cli = Cli::try_parse_from(["flow", "integrations"]).unwrap();
        assert!(matches!(cli.command, Command::Integrations));
        assert!(cli.catalog.path.is_none());
    }

    #[test]
    fn test_rejects_zero_max_nodes() {
        let cli =
            Cli::try_parse_from(["flow", "inspect", "workflow.json", "--max-nodes", "0"]).unwrap();
        assert!(cli.validate().is_err());
    }
}

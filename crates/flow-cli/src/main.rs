#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;
mod report;

use std::io;
use std::process;

use anyhow::Context;

use crate::config::{Cli, Command};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "flow_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "flow_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "flow_cli::command";

fn main() {
    let Err(error) = run() else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_COMMAND,
            error = %format!("{error:#}"),
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate().context("invalid configuration")?;

    let catalog = cli
        .catalog
        .load()
        .context("failed to load integration catalog")?;
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Command::Inspect(args) => command::inspect(args, &catalog, cli.format, &mut stdout),
        Command::Integrations => command::integrations(&catalog, cli.format, &mut stdout),
    }
}

//! # rlog CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Sending messages through configured endpoints
//! - Blueprint validation
//! - Endpoint listing

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use cli::{Cli, Commands};
use commands::{run_emit, run_info, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    debug!(version = env!("CARGO_PKG_VERSION"), "rlog CLI starting");

    let result = match &cli.command {
        Commands::Emit(args) => run_emit(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize diagnostics based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    observability::init(&observability::Diagnostics {
        format: cli.log_format.into(),
        verbosity: observability::Verbosity::from_flags(cli.quiet, cli.verbose),
        metrics_port: cli.metrics_port,
    })
}

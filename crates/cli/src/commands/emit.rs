//! `emit` command implementation.

use anyhow::{Context, Result};
use observability::MetricsSummary;
use rlog::Logger;
use tracing::{info, warn};

use crate::cli::EmitArgs;

/// Execute the `emit` command
pub fn run_emit(args: &EmitArgs) -> Result<()> {
    let logger = build_logger(args)?;

    if args.tag.is_empty() {
        warn!("Empty tag, message dropped");
    }
    let message = args.message.join(" ");
    logger.print_raw(args.level, &args.tag, format_args!("{message}"));

    let metrics = logger.metrics();
    observability::record_logger_metrics(&metrics);

    let summary = MetricsSummary::from_snapshots(&metrics);
    if summary.total_failures > 0 {
        warn!(
            failures = summary.total_failures,
            "Some endpoints failed to write"
        );
    }
    if args.stats {
        eprint!("{summary}");
    }

    logger.shutdown();
    Ok(())
}

fn build_logger(args: &EmitArgs) -> Result<Logger> {
    let Some(path) = &args.config else {
        return Ok(Logger::new());
    };

    info!(config = %path.display(), "Building logger from configuration");
    let blueprint = config_loader::ConfigLoader::load_from_path(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    rlog::create_logger(&blueprint).context("Failed to set up endpoints")
}

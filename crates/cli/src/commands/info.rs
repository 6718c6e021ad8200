//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{BuiltinWriter, LoggingBlueprint};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    buffer_capacity: usize,
    seed_std: bool,
    endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
struct EndpointInfo {
    name: String,
    writer: BuiltinWriter,
    enabled: bool,
    destination: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    let info = build_config_info(&blueprint);

    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{json}");
    } else {
        print_config_info(&info);
    }

    Ok(())
}

fn build_config_info(blueprint: &LoggingBlueprint) -> ConfigInfo {
    let endpoints = blueprint
        .endpoints
        .iter()
        .map(|ep| EndpointInfo {
            name: ep.name.clone(),
            writer: ep.writer,
            enabled: ep.enabled,
            destination: match ep.writer {
                BuiltinWriter::Fd => ep.fd.map(|fd| format!("fd {fd}")).unwrap_or_default(),
                BuiltinWriter::Socket => {
                    ep.target.as_ref().map(ToString::to_string).unwrap_or_default()
                }
            },
        })
        .collect();

    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        buffer_capacity: blueprint.logger.buffer_capacity,
        seed_std: blueprint.logger.seed_std,
        endpoints,
    }
}

fn print_config_info(info: &ConfigInfo) {
    println!("Logger");
    println!("   ├─ Version: {}", info.version);
    println!("   ├─ Buffer capacity: {} bytes", info.buffer_capacity);
    println!(
        "   └─ std endpoint: {}",
        if info.seed_std { "fd 1" } else { "not seeded" }
    );

    println!("\nEndpoints ({})", info.endpoints.len());
    for (i, ep) in info.endpoints.iter().enumerate() {
        let prefix = if i == info.endpoints.len() - 1 {
            "└─"
        } else {
            "├─"
        };
        let state = if ep.enabled { "enabled" } else { "disabled" };
        println!(
            "   {prefix} {} [{}] {} ({state})",
            ep.name, ep.writer, ep.destination
        );
    }
}

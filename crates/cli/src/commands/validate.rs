//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::LoggingBlueprint;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    buffer_capacity: usize,
    seed_std: bool,
    endpoint_count: usize,
    enabled_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{json}");
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: (!warnings.is_empty()).then_some(warnings),
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    buffer_capacity: blueprint.logger.buffer_capacity,
                    seed_std: blueprint.logger.seed_std,
                    endpoint_count: blueprint.endpoints.len(),
                    enabled_count: blueprint.endpoints.iter().filter(|e| e.enabled).count(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &LoggingBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    let enabled = blueprint.endpoints.iter().filter(|e| e.enabled).count();
    if enabled == 0 && !blueprint.logger.seed_std {
        warnings.push("No endpoint starts enabled - messages will be dropped".to_string());
    }

    for endpoint in blueprint.endpoints.iter().filter(|e| !e.enabled) {
        warnings.push(format!(
            "Endpoint '{}' is registered but starts disabled",
            endpoint.name
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Buffer capacity: {} bytes", summary.buffer_capacity);
            println!("  Seed std: {}", summary.seed_std);
            println!(
                "  Endpoints: {} ({} enabled)",
                summary.endpoint_count, summary.enabled_count
            );
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {warning}");
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_valid_config_with_warnings() {
        let file = config_file(
            r#"
[logger]
seed_std = false

[[endpoints]]
name = "spare"
writer = "fd"
fd = 2
enabled = false
"#,
        );
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
            json: true,
        };
        let result = validate_config(&args);
        assert!(result.valid);
        let warnings = result.warnings.unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[1].contains("'spare'"));
    }

    #[test]
    fn test_invalid_config_reports_error() {
        let file = config_file(
            r#"
[[endpoints]]
name = "std"
writer = "fd"
fd = 1
"#,
        );
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
            json: false,
        };
        assert!(run_validate(&args).is_err());
        let result = validate_config(&args);
        assert!(result.error.unwrap().contains("reserved"));
    }

    #[test]
    fn test_missing_file() {
        let args = ValidateArgs {
            config: "/nonexistent/rlog.toml".into(),
            json: false,
        };
        let result = validate_config(&args);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("File not found"));
    }
}

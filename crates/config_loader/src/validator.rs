//! Blueprint validation
//!
//! Rules:
//! - endpoint names are non-empty and unique
//! - `"std"` is reserved while the logger seeds it
//! - `fd` endpoints carry a non-negative descriptor
//! - `socket` endpoints carry a target
//! - the buffer capacity stays within bounds

use std::collections::HashSet;
use std::ops::RangeInclusive;

use contracts::{BuiltinWriter, ContractError, LoggingBlueprint, STD_ENDPOINT};

/// Accepted render buffer capacities
pub const BUFFER_CAPACITY_RANGE: RangeInclusive<usize> = 64..=1024 * 1024;

/// Validate a LoggingBlueprint
///
/// Returns the first error encountered.
pub fn validate(blueprint: &LoggingBlueprint) -> Result<(), ContractError> {
    validate_logger(blueprint)?;
    validate_endpoint_names(blueprint)?;
    validate_endpoint_args(blueprint)?;
    Ok(())
}

fn validate_logger(blueprint: &LoggingBlueprint) -> Result<(), ContractError> {
    let capacity = blueprint.logger.buffer_capacity;
    if !BUFFER_CAPACITY_RANGE.contains(&capacity) {
        return Err(ContractError::config_validation(
            "logger.buffer_capacity",
            format!(
                "buffer_capacity must be within {}..={}, got {capacity}",
                BUFFER_CAPACITY_RANGE.start(),
                BUFFER_CAPACITY_RANGE.end()
            ),
        ));
    }
    Ok(())
}

fn validate_endpoint_names(blueprint: &LoggingBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for (idx, endpoint) in blueprint.endpoints.iter().enumerate() {
        if endpoint.name.is_empty() {
            return Err(ContractError::config_validation(
                format!("endpoints[{idx}].name"),
                "endpoint name cannot be empty",
            ));
        }
        if blueprint.logger.seed_std && endpoint.name == STD_ENDPOINT {
            return Err(ContractError::config_validation(
                format!("endpoints[name={}]", endpoint.name),
                "name is reserved while logger.seed_std is set",
            ));
        }
        if !seen.insert(endpoint.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("endpoints[name={}]", endpoint.name),
                "duplicate endpoint name",
            ));
        }
    }
    Ok(())
}

fn validate_endpoint_args(blueprint: &LoggingBlueprint) -> Result<(), ContractError> {
    for endpoint in &blueprint.endpoints {
        match endpoint.writer {
            BuiltinWriter::Fd => match endpoint.fd {
                Some(fd) if fd >= 0 => {}
                Some(fd) => {
                    return Err(ContractError::config_validation(
                        format!("endpoints[{}].fd", endpoint.name),
                        format!("fd must be >= 0, got {fd}"),
                    ));
                }
                None => {
                    return Err(ContractError::config_validation(
                        format!("endpoints[{}].fd", endpoint.name),
                        "fd endpoints require a descriptor",
                    ));
                }
            },
            BuiltinWriter::Socket => {
                if endpoint.target.is_none() {
                    return Err(ContractError::config_validation(
                        format!("endpoints[{}].target", endpoint.name),
                        "socket endpoints require a target",
                    ));
                }
            }
        }
    }
    Ok(())
}

//! Blueprint parsing
//!
//! TOML is the primary format, JSON is accepted too.

use contracts::{ContractError, LoggingBlueprint};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (preferred)
    Toml,
    Json,
}

impl ConfigFormat {
    /// Infer the format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn parse_toml(content: &str) -> Result<LoggingBlueprint, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

pub fn parse_json(content: &str) -> Result<LoggingBlueprint, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

pub fn parse(content: &str, format: ConfigFormat) -> Result<LoggingBlueprint, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{BuiltinWriter, InitArg, SocketTarget};

    #[test]
    fn test_parse_toml_endpoints() {
        let content = r#"
[logger]
buffer_capacity = 1024
seed_std = false

[[endpoints]]
name = "stderr"
writer = "fd"
fd = 2

[[endpoints]]
name = "collector"
writer = "socket"
target = "udp://127.0.0.1:5140"
enabled = false
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.logger.buffer_capacity, 1024);
        assert!(!bp.logger.seed_std);
        assert_eq!(bp.endpoints.len(), 2);

        let stderr = &bp.endpoints[0];
        assert_eq!(stderr.writer, BuiltinWriter::Fd);
        assert!(stderr.enabled);
        assert!(matches!(stderr.init_arg(), InitArg::Fd(2)));

        let collector = &bp.endpoints[1];
        assert_eq!(
            collector.target,
            Some(SocketTarget::Udp("127.0.0.1:5140".into()))
        );
        assert!(!collector.enabled);
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "endpoints": [{ "name": "err", "writer": "fd", "fd": 2 }]
        }"#;
        let result = parse_json(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert!(bp.logger.seed_std);
        assert_eq!(bp.logger.buffer_capacity, contracts::DEFAULT_BUFFER_CAPACITY);
    }

    #[test]
    fn test_parse_bad_target_scheme() {
        let content = r#"
[[endpoints]]
name = "net"
writer = "socket"
target = "http://example.com:80"
"#;
        assert!(matches!(
            parse_toml(content),
            Err(ContractError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = parse_toml(content);
        assert!(matches!(result, Err(ContractError::ConfigParse { .. })));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}

//! LoggingBlueprint - Config Loader output
//!
//! Describes a complete logger setup: render buffer, default endpoint, and
//! the endpoints to register.

use serde::{Deserialize, Serialize};

use crate::{BuiltinWriter, InitArg, SocketTarget};

/// Default render buffer capacity in bytes
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// Name of the endpoint seeded at start-up
pub const STD_ENDPOINT: &str = "std";

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete logger blueprint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingBlueprint {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Logger-wide settings
    #[serde(default)]
    pub logger: LoggerSettings,

    /// Endpoint definitions
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

/// Logger-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Render buffer capacity (bytes, including the trailing newline)
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,

    /// Register and enable the `"std"` endpoint on stdout
    #[serde(default = "default_true")]
    pub seed_std: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            seed_std: true,
        }
    }
}

fn default_buffer_capacity() -> usize {
    DEFAULT_BUFFER_CAPACITY
}

fn default_true() -> bool {
    true
}

/// Endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Endpoint name
    pub name: String,

    /// Built-in writer type
    pub writer: BuiltinWriter,

    /// Enable right after registration
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Descriptor for `fd` endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fd: Option<i32>,

    /// Target for `socket` endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<SocketTarget>,
}

impl EndpointConfig {
    /// Init argument matching the writer type
    pub fn init_arg(&self) -> InitArg {
        match self.writer {
            BuiltinWriter::Fd => self.fd.map(InitArg::Fd).unwrap_or_default(),
            BuiltinWriter::Socket => self
                .target
                .clone()
                .map(InitArg::Socket)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let bp: LoggingBlueprint = serde_json::from_str("{}").unwrap();
        assert_eq!(bp.logger.buffer_capacity, DEFAULT_BUFFER_CAPACITY);
        assert!(bp.logger.seed_std);
        assert!(bp.endpoints.is_empty());
    }

    #[test]
    fn test_endpoint_init_arg() {
        let ep: EndpointConfig =
            serde_json::from_str(r#"{"name":"err","writer":"fd","fd":2}"#).unwrap();
        assert!(ep.enabled);
        assert!(matches!(ep.init_arg(), InitArg::Fd(2)));

        let ep: EndpointConfig = serde_json::from_str(
            r#"{"name":"net","writer":"socket","target":"udp://127.0.0.1:5140","enabled":false}"#,
        )
        .unwrap();
        assert!(!ep.enabled);
        assert!(matches!(ep.init_arg(), InitArg::Socket(SocketTarget::Udp(_))));
    }
}

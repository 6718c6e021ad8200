//! Registry error types

use thiserror::Error;

/// Registry status errors
#[derive(Debug, Error)]
pub enum RlogError {
    /// An endpoint with this name is already registered
    #[error("endpoint '{0}' already registered")]
    DuplicateName(String),

    /// No endpoint with this name
    #[error("endpoint '{0}' not found")]
    NotFound(String),

    /// Enable requested on an endpoint that is already enabled
    #[error("endpoint '{0}' already enabled")]
    AlreadyEnabled(String),

    /// The writer's `init` failed; the endpoint stays disabled
    #[error("endpoint '{name}' writer init failed: {source}")]
    WriterInitFailed {
        name: String,
        #[source]
        source: contracts::ContractError,
    },

    /// Absent or malformed argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl RlogError {
    pub fn writer_init_failed(name: impl Into<String>, source: contracts::ContractError) -> Self {
        Self::WriterInitFailed {
            name: name.into(),
            source,
        }
    }

    /// Stable numeric status code
    pub const fn code(&self) -> i32 {
        match self {
            RlogError::DuplicateName(_) => -1,
            RlogError::NotFound(_) => -2,
            RlogError::AlreadyEnabled(_) => -3,
            RlogError::WriterInitFailed { .. } => -4,
            RlogError::InvalidArgument(_) => -5,
        }
    }
}

/// Numeric status of a registry call: 0 on success, the error code otherwise
pub fn status_code<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.code(),
    }
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RlogError>;

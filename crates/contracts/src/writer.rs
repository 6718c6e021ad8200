//! LogWriter trait - endpoint output interface
//!
//! Defines the capability every logging endpoint implements.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{ContractError, SocketTarget};

/// Endpoint writer capability
///
/// All endpoint implementations must implement this trait. Methods take `&self`
/// because the registry shares one writer between the control plane
/// (`init`/`destroy`) and every concurrent `print` (`write`); implementations
/// keep their mutable state behind their own lock.
pub trait LogWriter: Send + Sync {
    /// Acquire resources using the endpoint's init argument
    ///
    /// Called once per enable transition. An error aborts the enable.
    fn init(&self, arg: &InitArg) -> Result<(), ContractError>;

    /// Release whatever `init` acquired
    ///
    /// Called once per disable transition. Must tolerate a preceding `init`
    /// that failed or never ran.
    fn destroy(&self);

    /// Append one rendered line to the destination
    ///
    /// Runs while the logger holds its fan-out lock. From here a writer may
    /// log again or query `is_enabled`, but must not add, remove, enable or
    /// disable endpoints, nor list endpoints or metrics: those wait on a
    /// transition that is itself waiting for this write to return.
    ///
    /// # Errors
    /// Returns write error (should include context). Never retried.
    fn write(&self, data: &[u8]) -> Result<(), ContractError>;
}

/// Opaque argument handed to [`LogWriter::init`]
#[derive(Clone, Debug, Default)]
pub enum InitArg {
    /// No argument
    #[default]
    None,
    /// Raw file descriptor for the fd writer
    Fd(i32),
    /// Connection target for the socket writer
    Socket(SocketTarget),
    /// Anything a caller-supplied writer understands
    Custom(Arc<dyn Any + Send + Sync>),
}

impl InitArg {
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        InitArg::Custom(Arc::new(value))
    }

    /// Downcast a `Custom` argument
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            InitArg::Custom(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, InitArg::None)
    }
}

impl From<SocketTarget> for InitArg {
    fn from(target: SocketTarget) -> Self {
        InitArg::Socket(target)
    }
}

/// Built-in writer types the registry can instantiate itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinWriter {
    /// Wraps a raw file descriptor (`InitArg::Fd`)
    Fd,
    /// Wraps a socket-based log transport (`InitArg::Socket`)
    Socket,
}

impl BuiltinWriter {
    pub const fn as_str(self) -> &'static str {
        match self {
            BuiltinWriter::Fd => "fd",
            BuiltinWriter::Socket => "socket",
        }
    }
}

impl fmt::Display for BuiltinWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuiltinWriter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fd" => Ok(BuiltinWriter::Fd),
            "socket" => Ok(BuiltinWriter::Socket),
            other => Err(format!("unknown writer type '{other}'")),
        }
    }
}

/// Who is responsible for the writer instance of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    /// Created by or handed over to the registry; released on removal
    Owned,
    /// Caller keeps its own handle; the registry only borrows a reference
    Shared,
}

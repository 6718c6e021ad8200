//! # rlog
//!
//! Multi-endpoint logging core.
//!
//! Responsibilities:
//! - Named endpoint registry with an enable/disable lifecycle
//! - Rendering `tag/L  [timestamp]  message` lines into a bounded buffer
//! - Fan-out of every line to each enabled endpoint
//! - A process-wide default logger seeded with a `"std"` endpoint
//! - Level macros gated at compile time

pub mod dispatcher;
pub mod error;
pub mod format;
pub mod global;
pub mod macros;
pub mod metrics;
pub mod registry;
pub mod writers;

pub use contracts::{
    BuiltinWriter, ContractError, InitArg, LogLevel, LogWriter, LoggingBlueprint, Ownership,
    SocketTarget,
};
pub use dispatcher::{Logger, LoggerBuilder, create_logger};
pub use error::{Result, RlogError, status_code};
pub use format::render;
pub use global::{
    add_builtin_endpoint, add_endpoint, add_fn_endpoint, add_owned_endpoint, enable_endpoint,
    global, install_global, print, print_raw, remove_endpoint,
};
pub use macros::{STATIC_MIN_LEVEL, level_enabled};
pub use metrics::{EndpointMetrics, MetricsSnapshot};
pub use registry::{EndpointInfo, Registry};
pub use writers::{FdWriter, FnWriter, SocketWriter};

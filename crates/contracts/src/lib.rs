//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! - [`LogWriter`]: the capability every endpoint implementation satisfies
//! - [`LogLevel`]: message severity and its single-character rendering
//! - [`LoggingBlueprint`]: the config loader output
//! - [`ContractError`]: the shared error type

mod blueprint;
mod error;
mod level;
mod target;
mod writer;

pub use blueprint::*;
pub use error::*;
pub use level::*;
pub use target::SocketTarget;
pub use writer::*;

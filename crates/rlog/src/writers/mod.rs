//! Writer implementations
//!
//! Contains FdWriter, SocketWriter, and the FnWriter closure adapter.

mod fd;
mod func;
mod socket;

pub use self::fd::FdWriter;
pub use self::func::FnWriter;
pub use self::socket::SocketWriter;

use contracts::{BuiltinWriter, LogWriter};

/// Instantiate a built-in writer
pub fn create_builtin(kind: BuiltinWriter) -> Box<dyn LogWriter> {
    match kind {
        BuiltinWriter::Fd => Box::new(FdWriter::new()),
        BuiltinWriter::Socket => Box::new(SocketWriter::new()),
    }
}

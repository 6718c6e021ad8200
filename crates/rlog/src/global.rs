//! Process-wide default logger
//!
//! Created on first use with a seeded `"std"` endpoint, unless a logger was
//! installed before that. Lives for the rest of the process.
//!
//! The default sits in a static and is never dropped, so its endpoints,
//! `"std"` included, are not destroyed at exit. Callers that need teardown
//! should disable their endpoints explicitly or use their own [`Logger`].

use std::fmt;
use std::sync::{Arc, OnceLock};

use contracts::{BuiltinWriter, InitArg, LogLevel, LogWriter};

use crate::dispatcher::Logger;
use crate::error::Result;
use crate::writers::FnWriter;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// The default logger
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::new)
}

/// Install `logger` as the default
///
/// Only possible before the default is first used; otherwise the logger is
/// handed back.
pub fn install_global(logger: Logger) -> std::result::Result<(), Logger> {
    GLOBAL.set(logger)
}

pub fn add_endpoint(name: &str, writer: Arc<dyn LogWriter>) -> Result<()> {
    global().add_endpoint(name, writer)
}

pub fn add_owned_endpoint(name: &str, writer: Box<dyn LogWriter>) -> Result<()> {
    global().add_owned_endpoint(name, writer)
}

pub fn add_builtin_endpoint(name: &str, kind: BuiltinWriter) -> Result<()> {
    global().add_builtin_endpoint(name, kind)
}

pub fn add_fn_endpoint(name: &str, writer: FnWriter) -> Result<()> {
    global().add_fn_endpoint(name, writer)
}

pub fn remove_endpoint(name: &str) {
    global().remove_endpoint(name)
}

pub fn enable_endpoint(name: &str, arg: InitArg, enable: bool) -> Result<()> {
    global().enable_endpoint(name, arg, enable)
}

pub fn print(level: LogLevel, tag: &str, args: fmt::Arguments<'_>) {
    global().print(level, tag, args)
}

pub fn print_raw(level: u8, tag: &str, args: fmt::Arguments<'_>) {
    global().print_raw(level, tag, args)
}

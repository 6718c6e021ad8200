//! Logger - renders lines and fans them out to enabled endpoints

use chrono::Local;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use contracts::{
    BuiltinWriter, DEFAULT_BUFFER_CAPACITY, InitArg, LogLevel, LogWriter, LoggingBlueprint,
    Ownership, STD_ENDPOINT,
};

use crate::error::Result;
use crate::format::{MIN_BUFFER_CAPACITY, render};
use crate::metrics::MetricsSnapshot;
use crate::registry::{EndpointInfo, Registry};
use crate::writers::{FnWriter, create_builtin};

/// Descriptor the `"std"` endpoint is enabled with
const STDOUT_FD: i32 = 1;

/// Builder for creating a Logger
#[derive(Debug, Clone)]
pub struct LoggerBuilder {
    buffer_capacity: usize,
    seed_std: bool,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            seed_std: true,
        }
    }
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper bound on one rendered line, newline included
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Register and enable an FD endpoint named `"std"` on stdout
    pub fn seed_std(mut self, seed: bool) -> Self {
        self.seed_std = seed;
        self
    }

    #[instrument(name = "logger_builder_build", skip(self), fields(capacity = self.buffer_capacity))]
    pub fn build(self) -> Logger {
        let logger = Logger {
            registry: Registry::new(),
            buffer_capacity: self.buffer_capacity.max(MIN_BUFFER_CAPACITY),
        };
        if self.seed_std {
            if let Err(e) = logger.seed_std() {
                // stdout may be closed; the logger still works without it
                warn!(error = %e, "Failed to seed std endpoint");
            }
        }
        logger
    }
}

/// A logging context: endpoint registry plus the formatting dispatcher
///
/// Dropping the logger disables and destroys every endpoint.
pub struct Logger {
    registry: Registry,
    buffer_capacity: usize,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Logger with the default capacity and a seeded `"std"` endpoint
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    fn seed_std(&self) -> Result<()> {
        self.add_builtin_endpoint(STD_ENDPOINT, BuiltinWriter::Fd)?;
        self.enable_endpoint(STD_ENDPOINT, InitArg::Fd(STDOUT_FD), true)
    }

    /// Register a caller-shared writer under `name`, disabled
    ///
    /// The caller keeps its own handle; removal only drops the registry's.
    pub fn add_endpoint(&self, name: &str, writer: Arc<dyn LogWriter>) -> Result<()> {
        self.registry.add(name, writer, Ownership::Shared)
    }

    /// Register a writer the logger owns and releases on removal
    pub fn add_owned_endpoint(&self, name: &str, writer: Box<dyn LogWriter>) -> Result<()> {
        self.registry.add(name, Arc::from(writer), Ownership::Owned)
    }

    /// Register a fresh instance of a built-in writer
    pub fn add_builtin_endpoint(&self, name: &str, kind: BuiltinWriter) -> Result<()> {
        self.add_owned_endpoint(name, create_builtin(kind))
    }

    /// Register a closure bundle as an owned writer
    pub fn add_fn_endpoint(&self, name: &str, writer: FnWriter) -> Result<()> {
        self.add_owned_endpoint(name, Box::new(writer))
    }

    /// Disable (if enabled) and erase an endpoint; unknown names are ignored
    pub fn remove_endpoint(&self, name: &str) {
        self.registry.remove(name)
    }

    /// Enable with `arg`, or disable when `enable` is false
    ///
    /// `arg` is ignored when disabling.
    pub fn enable_endpoint(&self, name: &str, arg: InitArg, enable: bool) -> Result<()> {
        self.registry.set_enabled(name, arg, enable)
    }

    /// Format one line and send it to every enabled endpoint
    ///
    /// An empty tag drops the call. Endpoint failures are not reported.
    pub fn print(&self, level: LogLevel, tag: &str, args: fmt::Arguments<'_>) {
        self.print_raw(level.as_u8(), tag, args)
    }

    /// [`Logger::print`] for a raw level; out-of-range values render as `U`
    pub fn print_raw(&self, level: u8, tag: &str, args: fmt::Arguments<'_>) {
        if tag.is_empty() {
            return;
        }
        let line = render(self.buffer_capacity, level, tag, &Local::now(), args);
        self.registry.fan_out(&line);
    }

    /// Snapshot of every endpoint, sorted by name
    pub fn endpoints(&self) -> Vec<EndpointInfo> {
        self.registry.endpoints()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.registry.is_enabled(name)
    }

    /// Get metrics for all endpoints
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        self.registry.metrics()
    }

    /// Disable and destroy every endpoint
    ///
    /// Same as dropping the logger, spelled out for call sites that want it
    /// visible.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.registry.clear();
        debug!("Logger shut down");
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("buffer_capacity", &self.buffer_capacity)
            .field("enabled", &self.registry.enabled_names())
            .finish()
    }
}

/// Convenience function to create a logger from a blueprint
///
/// Endpoints are added in order and enabled when their `enabled` flag is set.
/// On error the partially built logger is dropped, which tears down what was
/// already enabled.
#[instrument(
    name = "logger_create",
    skip(blueprint),
    fields(endpoint_count = blueprint.endpoints.len())
)]
pub fn create_logger(blueprint: &LoggingBlueprint) -> Result<Logger> {
    let logger = Logger::builder()
        .buffer_capacity(blueprint.logger.buffer_capacity)
        .seed_std(blueprint.logger.seed_std)
        .build();

    for endpoint in &blueprint.endpoints {
        logger.add_builtin_endpoint(&endpoint.name, endpoint.writer)?;
        if endpoint.enabled {
            logger
                .enable_endpoint(&endpoint.name, endpoint.init_arg(), true)
                .inspect_err(|e| {
                    debug!(endpoint = %endpoint.name, error = %e, "Blueprint endpoint failed");
                })?;
        }
    }
    Ok(logger)
}

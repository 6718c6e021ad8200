//! # Observability
//!
//! Diagnostics for rlog tooling: a `tracing` subscriber on stderr and an
//! optional Prometheus exporter for endpoint metrics.
//!
//! ```ignore
//! observability::init(&Diagnostics {
//!     format: LogFormat::Compact,
//!     verbosity: Verbosity::Verbose(1),
//!     metrics_port: None,
//! })?;
//!
//! let logger = rlog::create_logger(&blueprint)?;
//! observability::record_logger_metrics(&logger.metrics());
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::metrics::{MetricsSummary, record_endpoint_metrics, record_logger_metrics};

/// Diagnostic output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

/// How chatty the diagnostics are when `RUST_LOG` is unset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    #[default]
    Normal,
    /// One step per `-v`
    Verbose(u8),
}

impl Verbosity {
    /// Build from the usual `-q` / `-v` command-line counts
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, n) => Self::Verbose(n),
        }
    }

    /// `EnvFilter` directive for this verbosity
    pub fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose(1) => "debug",
            Self::Verbose(_) => "trace",
        }
    }
}

/// Diagnostics setup for one process
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub format: LogFormat,
    pub verbosity: Verbosity,
    /// Prometheus listener port, `None` leaves the exporter off
    pub metrics_port: Option<u16>,
}

/// Install the tracing subscriber and, if asked, the Prometheus exporter
///
/// Output goes to stderr so it never interleaves with a `"std"` endpoint on
/// stdout. `RUST_LOG` overrides the verbosity.
///
/// # Errors
/// Fails if a global subscriber or recorder is already installed.
pub fn init(diagnostics: &Diagnostics) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(diagnostics.verbosity.directive()));

    let layer = match diagnostics.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_thread_names(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    if let Some(port) = diagnostics.metrics_port {
        PrometheusBuilder::new()
            .with_http_listener(([0, 0, 0, 0], port))
            .install()
            .context("Failed to install Prometheus recorder")?;
        tracing::info!(port, "Prometheus metrics endpoint listening");
    }

    tracing::debug!(format = ?diagnostics.format, verbosity = ?diagnostics.verbosity, "Diagnostics ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, 3), Verbosity::Verbose(3));
        // quiet wins over any -v
        assert_eq!(Verbosity::from_flags(true, 2), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_directives() {
        let directives: Vec<&str> = [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose(1),
            Verbosity::Verbose(9),
        ]
        .into_iter()
        .map(Verbosity::directive)
        .collect();
        assert_eq!(directives, ["error", "warn", "debug", "trace"]);
    }

    #[test]
    fn test_second_init_fails() {
        let diagnostics = Diagnostics {
            format: LogFormat::Compact,
            ..Default::default()
        };
        // The first call may race other tests in this binary; the second
        // always finds a subscriber in place.
        let _ = init(&diagnostics);
        assert!(init(&diagnostics).is_err());
    }
}

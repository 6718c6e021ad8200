//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use contracts::LogLevel;
use std::path::PathBuf;

/// rlog - send messages through configured log endpoints
#[derive(Parser, Debug)]
#[command(
    name = "rlog",
    author,
    version,
    about = "Multi-endpoint logger front end",
    long_about = "Builds a logger from a TOML/JSON blueprint and sends messages through \n\
                  every enabled endpoint (file descriptors, TCP/UDP/unix sockets).\n\n\
                  Without a configuration file the default logger writes to stdout."
)]
pub struct Cli {
    /// Increase diagnostic verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "RLOG_VERBOSE")]
    pub verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Diagnostic output format (diagnostics go to stderr)
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "RLOG_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Expose endpoint metrics on this Prometheus port
    #[arg(long, global = true, env = "RLOG_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one message through every enabled endpoint
    Emit(EmitArgs),

    /// Validate configuration file
    Validate(ValidateArgs),

    /// Display configured endpoints
    Info(InfoArgs),
}

/// Arguments for the `emit` command
#[derive(Parser, Debug, Clone)]
pub struct EmitArgs {
    /// Path to configuration file (TOML or JSON); default logger when omitted
    #[arg(short, long, env = "RLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Tag printed in front of the level letter
    #[arg(short, long, default_value = "RLOG")]
    pub tag: String,

    /// Level name, letter or number (numbers above 4 print as 'U')
    #[arg(short, long, default_value = "info", value_parser = parse_level)]
    pub level: u8,

    /// Print per-endpoint write counters to stderr afterwards
    #[arg(long)]
    pub stats: bool,

    /// Message text; multiple words are joined with spaces
    #[arg(required = true, trailing_var_arg = true)]
    pub message: Vec<String>,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "rlog.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "rlog.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Diagnostic output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}

/// Parse a level given by name, letter or raw number
fn parse_level(s: &str) -> Result<u8, String> {
    if let Ok(raw) = s.parse::<u8>() {
        return Ok(raw);
    }
    s.parse::<LogLevel>().map(LogLevel::as_u8)
}

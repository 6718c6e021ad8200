//! Log levels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message severity, least severe first
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Verbose = 0,
    Debug = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
}

impl LogLevel {
    /// All levels in ascending severity
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Verbose,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create from a raw level (returns None if out of range)
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(LogLevel::Verbose),
            1 => Some(LogLevel::Debug),
            2 => Some(LogLevel::Info),
            3 => Some(LogLevel::Warning),
            4 => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// Character used in the rendered line header
    pub const fn as_char(self) -> char {
        match self {
            LogLevel::Verbose => 'V',
            LogLevel::Debug => 'D',
            LogLevel::Info => 'I',
            LogLevel::Warning => 'W',
            LogLevel::Error => 'E',
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

/// Header character for a raw level; `U` when out of range
pub const fn level_char(raw: u8) -> char {
    match LogLevel::from_u8(raw) {
        Some(level) => level.as_char(),
        None => 'U',
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    /// Accepts full names, single-letter forms and numeric levels
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "verbose" | "v" | "0" => Ok(LogLevel::Verbose),
            "debug" | "d" | "1" => Ok(LogLevel::Debug),
            "info" | "i" | "2" => Ok(LogLevel::Info),
            "warning" | "warn" | "w" | "3" => Ok(LogLevel::Warning),
            "error" | "e" | "4" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

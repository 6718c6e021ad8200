//! Level-gated logging macros
//!
//! Each macro checks its level against [`STATIC_MIN_LEVEL`] in a const
//! context, so calls below the threshold compile to nothing and their
//! arguments are never evaluated.
//!
//! ```ignore
//! rlog_info!("NET", "connected to {}", addr);
//! rlog_error!(logger: &my_logger; "DB", "query failed: {err}");
//! ```

use contracts::LogLevel;

/// Lowest level the macros emit, `None` when logging is compiled out
///
/// Chosen by the `min-level-*` cargo features; the lowest selected level
/// wins, Info when none is selected.
pub const STATIC_MIN_LEVEL: Option<LogLevel> = if cfg!(feature = "min-level-verbose") {
    Some(LogLevel::Verbose)
} else if cfg!(feature = "min-level-debug") {
    Some(LogLevel::Debug)
} else if cfg!(feature = "min-level-warning") {
    Some(LogLevel::Warning)
} else if cfg!(feature = "min-level-error") {
    Some(LogLevel::Error)
} else if cfg!(feature = "min-level-off") {
    None
} else {
    Some(LogLevel::Info)
};

/// Whether the macros emit at `level`
pub const fn level_enabled(level: LogLevel) -> bool {
    match STATIC_MIN_LEVEL {
        Some(min) => level as u8 >= min as u8,
        None => false,
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __rlog_gated {
    ($logger:expr, $level:expr, $tag:expr, $($arg:tt)+) => {{
        const ENABLED: bool = $crate::level_enabled($level);
        if ENABLED {
            $logger.print($level, $tag, ::core::format_args!($($arg)+));
        }
    }};
}

/// Log at Verbose
#[macro_export]
macro_rules! rlog_verbose {
    (logger: $logger:expr; $tag:expr, $($arg:tt)+) => {
        $crate::__rlog_gated!($logger, $crate::LogLevel::Verbose, $tag, $($arg)+)
    };
    ($tag:expr, $($arg:tt)+) => {
        $crate::__rlog_gated!($crate::global(), $crate::LogLevel::Verbose, $tag, $($arg)+)
    };
}

/// Log at Debug
#[macro_export]
macro_rules! rlog_debug {
    (logger: $logger:expr; $tag:expr, $($arg:tt)+) => {
        $crate::__rlog_gated!($logger, $crate::LogLevel::Debug, $tag, $($arg)+)
    };
    ($tag:expr, $($arg:tt)+) => {
        $crate::__rlog_gated!($crate::global(), $crate::LogLevel::Debug, $tag, $($arg)+)
    };
}

/// Log at Info
#[macro_export]
macro_rules! rlog_info {
    (logger: $logger:expr; $tag:expr, $($arg:tt)+) => {
        $crate::__rlog_gated!($logger, $crate::LogLevel::Info, $tag, $($arg)+)
    };
    ($tag:expr, $($arg:tt)+) => {
        $crate::__rlog_gated!($crate::global(), $crate::LogLevel::Info, $tag, $($arg)+)
    };
}

/// Log at Warning
#[macro_export]
macro_rules! rlog_warning {
    (logger: $logger:expr; $tag:expr, $($arg:tt)+) => {
        $crate::__rlog_gated!($logger, $crate::LogLevel::Warning, $tag, $($arg)+)
    };
    ($tag:expr, $($arg:tt)+) => {
        $crate::__rlog_gated!($crate::global(), $crate::LogLevel::Warning, $tag, $($arg)+)
    };
}

/// Log at Error
#[macro_export]
macro_rules! rlog_error {
    (logger: $logger:expr; $tag:expr, $($arg:tt)+) => {
        $crate::__rlog_gated!($logger, $crate::LogLevel::Error, $tag, $($arg)+)
    };
    ($tag:expr, $($arg:tt)+) => {
        $crate::__rlog_gated!($crate::global(), $crate::LogLevel::Error, $tag, $($arg)+)
    };
}

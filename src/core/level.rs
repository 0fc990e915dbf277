//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a log record.
///
/// `NoLevel` is a sentinel meaning "unset, use the default" and sorts below
/// every real level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[repr(i32)]
pub enum Level {
    NoLevel = 0,
    Trace = 1,
    Debug = 2,
    #[default]
    Info = 3,
    Warn = 4,
    Error = 5,
}

impl Level {
    /// Parse a level by name, case-insensitively and ignoring surrounding
    /// whitespace. Unrecognized names yield `NoLevel` so that levels can be
    /// set from config or environment variables in a predictable way.
    #[must_use]
    pub fn from_string(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" => Level::Warn,
            "error" => Level::Error,
            _ => Level::NoLevel,
        }
    }

    /// Inverse of `as i32`; out-of-range ordinals yield `NoLevel`.
    #[must_use]
    pub fn from_ordinal(n: i32) -> Self {
        match n {
            1 => Level::Trace,
            2 => Level::Debug,
            3 => Level::Info,
            4 => Level::Warn,
            5 => Level::Error,
            _ => Level::NoLevel,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::NoLevel => "none",
        }
    }

    /// Fixed-width bracket tag used by the plain-text encoder.
    #[must_use]
    pub fn bracket(&self) -> &'static str {
        match self {
            Level::Trace => "[TRACE]",
            Level::Debug => "[DEBUG]",
            Level::Info => "[INFO] ",
            Level::Warn => "[WARN] ",
            Level::Error => "[ERROR]",
            Level::NoLevel => "[?????]",
        }
    }

    /// Name used for the `@level` field of the JSON encoding. An unset level
    /// maps to `"all"`.
    #[must_use]
    pub fn json_name(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::NoLevel => "all",
        }
    }

    pub fn color(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Trace => BrightGreen,
            Level::Debug => BrightWhite,
            Level::Info => BrightBlue,
            Level::Warn => BrightYellow,
            Level::Error => BrightRed,
            Level::NoLevel => White,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

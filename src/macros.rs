//! Logging macros for ergonomic attribute construction.
//!
//! The emit methods take a slice of [`Value`](crate::Value)s alternating key
//! and value. `attrs!` builds that slice from anything convertible into a
//! `Value`, and the leveled macros combine it with the emit call.
//!
//! # Examples
//!
//! ```
//! use kvlog::prelude::*;
//! use kvlog::{attrs, info};
//!
//! let logger = Logger::default();
//!
//! // Slice construction only
//! logger.info("listening", attrs!["port", 8080u32, "proto", "tcp"]);
//!
//! // Leveled macro
//! info!(logger, "user action", "user_id", 42, "action", "login");
//! ```

/// Build a `&[Value]` attribute slice from `Into<Value>` expressions.
#[macro_export]
macro_rules! attrs {
    () => {
        &[] as &[$crate::Value]
    };
    ($($v:expr),+ $(,)?) => {
        &[$($crate::Value::from($v)),+][..]
    };
}

/// Emit a record at an explicit level.
///
/// ```
/// # use kvlog::prelude::*;
/// # let logger = Logger::default();
/// use kvlog::log;
/// log!(logger, Level::Warn, "running low", "remaining", 3);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($level, $msg, $crate::attrs![$($arg),*])
    };
}

/// Emit a trace-level record.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.trace($msg, $crate::attrs![$($arg),*])
    };
}

/// Emit a debug-level record.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.debug($msg, $crate::attrs![$($arg),*])
    };
}

/// Emit an info-level record.
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.info($msg, $crate::attrs![$($arg),*])
    };
}

/// Emit a warn-level record.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.warn($msg, $crate::attrs![$($arg),*])
    };
}

/// Emit an error-level record.
#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.error($msg, $crate::attrs![$($arg),*])
    };
}

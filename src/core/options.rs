//! Logger configuration
//!
//! `LoggerOptions` is built once and consumed by [`LoggerOptions::build`];
//! after construction a logger's configuration is immutable except through
//! the explicit reset operations.

use super::error::Result;
use super::level::Level;
use super::logger::Logger;
use super::value::Value;
use super::writer::ColorOption;
use crate::sinks::Sink;
use parking_lot::Mutex;
use std::sync::Arc;

/// Default timestamp format: RFC 3339 with millisecond precision.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Predicate deciding whether a record should be suppressed. Returning true
/// drops the record after the threshold check, before any encoding.
pub type ExcludePredicate = dyn Fn(Level, &str, &[Value]) -> bool + Send + Sync;

/// Configuration for a new logger.
///
/// # Example
///
/// ```
/// use kvlog::prelude::*;
/// use kvlog::sinks::BufferSink;
///
/// let sink = BufferSink::new();
/// let logger = LoggerOptions::new()
///     .name("svc")
///     .level(Level::Debug)
///     .sink(Box::new(sink.clone()))
///     .build()
///     .unwrap();
///
/// logger.info("ready", &[]);
/// assert!(sink.contents_string().contains("svc: ready"));
/// ```
pub struct LoggerOptions {
    pub(crate) name: String,
    pub(crate) level: Level,
    pub(crate) sinks: Vec<Box<dyn Sink>>,
    pub(crate) color: Vec<ColorOption>,
    pub(crate) lock: Option<Arc<Mutex<()>>>,
    pub(crate) json_format: bool,
    pub(crate) include_caller: bool,
    pub(crate) time_format: Option<String>,
    pub(crate) exclude: Option<Arc<ExcludePredicate>>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            level: Level::NoLevel,
            sinks: Vec::new(),
            color: Vec::new(),
            lock: None,
            json_format: false,
            include_caller: false,
            time_format: None,
            exclude: None,
        }
    }

    /// Name of the subsystem to prefix records with.
    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Severity threshold; anything less severe is suppressed.
    /// `NoLevel` means "use the default" (Info).
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Add an output sink with color disabled.
    #[must_use = "builder methods return a new value"]
    pub fn sink(self, sink: Box<dyn Sink>) -> Self {
        self.colored_sink(sink, ColorOption::Off)
    }

    /// Add an output sink with an explicit color option.
    #[must_use = "builder methods return a new value"]
    pub fn colored_sink(mut self, sink: Box<dyn Sink>, color: ColorOption) -> Self {
        self.sinks.push(sink);
        self.color.push(color);
        self
    }

    /// Share an output lock with another logger, for callers that want
    /// their log lines grouped across independently constructed loggers.
    #[must_use = "builder methods return a new value"]
    pub fn shared_lock(mut self, lock: Arc<Mutex<()>>) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Encode records as JSON objects instead of plain text.
    #[must_use = "builder methods return a new value"]
    pub fn json_format(mut self, json: bool) -> Self {
        self.json_format = json;
        self
    }

    /// Include the `file:line` of the logging call in each record.
    #[must_use = "builder methods return a new value"]
    pub fn include_caller(mut self, include: bool) -> Self {
        self.include_caller = include;
        self
    }

    /// Set the strftime-style timestamp format for the plain-text encoding.
    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = Some(format.into());
        self
    }

    /// Omit the timestamp entirely.
    #[must_use = "builder methods return a new value"]
    pub fn disable_time(mut self) -> Self {
        self.time_format = Some(String::new());
        self
    }

    /// Suppress records matching a predicate. Useful when a noisy collaborator
    /// cannot be silenced at the call sites.
    #[must_use = "builder methods return a new value"]
    pub fn exclude<F>(mut self, predicate: F) -> Self
    where
        F: Fn(Level, &str, &[Value]) -> bool + Send + Sync + 'static,
    {
        self.exclude = Some(Arc::new(predicate));
        self
    }

    /// Build the logger. Fails if a color option was requested on a sink
    /// that cannot carry it.
    pub fn build(self) -> Result<Logger> {
        Logger::from_options(self)
    }
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self::new()
    }
}

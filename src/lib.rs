//! # kvlog
//!
//! An embeddable structured logging core: a level, a message and a set of
//! key/value attributes become durable, ordered byte output across one or
//! more sinks, in a human-readable or JSON encoding.
//!
//! ## Features
//!
//! - **Hierarchical sub-loggers**: derive named loggers carrying inherited
//!   attributes; level changes propagate across the whole family
//! - **Multiple Sinks**: stderr, stdout, files, in-memory buffers, and
//!   severity-routing sinks, with per-sink colorization
//! - **Thread Safe**: lock-free threshold checks, one lock around the
//!   encode-and-flush of each record
//! - **Fire and Forget**: sink failures and unserializable attributes never
//!   surface to the logging call site
//!
//! ## Quick start
//!
//! ```
//! use kvlog::prelude::*;
//!
//! let logger = Logger::builder()
//!     .name("api")
//!     .level(Level::Debug)
//!     .build()
//!     .unwrap();
//!
//! logger.info("server started", &["port".into(), 8080u32.into()]);
//!
//! let request_log = logger.named("request").with_attrs(&[
//!     "request_id".into(),
//!     "abc-123".into(),
//! ]);
//! request_log.debug("handling", &[]);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallerSite, ColorOption, Level, Logger, LoggerError, LoggerOptions, MultiWriter, Result,
        Value, DEFAULT_TIME_FORMAT, MISSING_KEY,
    };
    pub use crate::sinks::{
        BufferSink, FileSink, Flushable, LeveledSink, Sink, StderrSink, StdoutSink, WriterSink,
    };
}

pub use crate::core::{
    CallerSite, ColorOption, Level, Logger, LoggerError, LoggerOptions, MultiWriter, Result,
    Value, DEFAULT_TIME_FORMAT, MISSING_KEY,
};
pub use crate::sinks::{
    BufferSink, FileSink, Flushable, LeveledSink, Sink, StderrSink, StdoutSink, WriterSink,
};

//! Output sink implementations
//!
//! A sink is a destination that accepts bytes. Sinks that opt into
//! severity-based routing additionally handle [`Sink::level_write`] and
//! report it via [`Sink::routes_by_level`].

pub mod buffer;
pub mod file;
pub mod leveled;
pub mod stdio;

pub use buffer::BufferSink;
pub use file::FileSink;
pub use leveled::LeveledSink;
pub use stdio::{StderrSink, StdoutSink};

use crate::core::level::Level;
use std::io;

/// A destination for encoded log records.
pub trait Sink: Send {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Deliver bytes tagged with their severity. The default implementation
    /// ignores the level and writes to the plain destination.
    fn level_write(&mut self, _level: Level, buf: &[u8]) -> io::Result<usize> {
        self.write(buf)
    }

    /// True if this sink routes records by severity, in which case the
    /// multi-writer calls [`Sink::level_write`] and skips colorization.
    fn routes_by_level(&self) -> bool {
        false
    }

    /// True if this sink is backed by a stream that can carry ANSI color
    /// codes. Requesting color on a sink that is not is a configuration
    /// error.
    fn is_terminal_capable(&self) -> bool {
        false
    }

    /// True if the underlying stream is attached to a terminal right now.
    /// Used to resolve [`ColorOption::Auto`](crate::core::ColorOption).
    fn is_terminal(&self) -> bool {
        false
    }
}

/// An output buffer that can be flushed before the logger swaps its sinks.
pub trait Flushable {
    fn flush(&mut self) -> crate::core::Result<()>;
}

/// Adapter exposing any `io::Write` as a sink. Not terminal-capable, so
/// color cannot be enabled on it.
pub struct WriterSink<W: io::Write + Send> {
    inner: W,
}

impl<W: io::Write + Send> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write + Send> Sink for WriterSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

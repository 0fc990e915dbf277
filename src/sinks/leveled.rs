//! Severity-routing sink

use super::Sink;
use crate::core::level::Level;
use std::collections::HashMap;
use std::io;

/// Routes records to a per-level override sink when one is configured,
/// falling back to the default sink otherwise.
///
/// Plain `write` always goes to the default sink, for compatibility with
/// consumers that do not know about levels.
///
/// ```
/// use kvlog::core::Level;
/// use kvlog::sinks::{BufferSink, LeveledSink, Sink};
///
/// let stdout = BufferSink::new();
/// let errors = BufferSink::new();
/// let mut sink = LeveledSink::new(Box::new(stdout.clone()))
///     .with_override(Level::Error, Box::new(errors.clone()));
///
/// sink.level_write(Level::Info, b"fine\n").unwrap();
/// sink.level_write(Level::Error, b"bad\n").unwrap();
/// assert_eq!(stdout.contents_string(), "fine\n");
/// assert_eq!(errors.contents_string(), "bad\n");
/// ```
pub struct LeveledSink {
    default: Box<dyn Sink>,
    overrides: HashMap<Level, Box<dyn Sink>>,
}

impl LeveledSink {
    pub fn new(default: Box<dyn Sink>) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    /// Route records of `level` to `sink` instead of the default.
    #[must_use]
    pub fn with_override(mut self, level: Level, sink: Box<dyn Sink>) -> Self {
        self.overrides.insert(level, sink);
        self
    }
}

impl Sink for LeveledSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.default.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.default.flush()?;
        for sink in self.overrides.values_mut() {
            sink.flush()?;
        }
        Ok(())
    }

    fn level_write(&mut self, level: Level, buf: &[u8]) -> io::Result<usize> {
        match self.overrides.get_mut(&level) {
            Some(sink) => sink.write(buf),
            None => self.default.write(buf),
        }
    }

    fn routes_by_level(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::BufferSink;

    #[test]
    fn test_plain_write_goes_to_default() {
        let default = BufferSink::new();
        let errors = BufferSink::new();
        let mut sink = LeveledSink::new(Box::new(default.clone()))
            .with_override(Level::Error, Box::new(errors.clone()));

        sink.write(b"plain\n").unwrap();
        assert_eq!(default.contents_string(), "plain\n");
        assert!(errors.contents().is_empty());
    }

    #[test]
    fn test_level_write_without_override_falls_back() {
        let default = BufferSink::new();
        let mut sink = LeveledSink::new(Box::new(default.clone()));

        sink.level_write(Level::Warn, b"warned\n").unwrap();
        assert_eq!(default.contents_string(), "warned\n");
    }

    #[test]
    fn test_routes_by_level() {
        let sink = LeveledSink::new(Box::new(BufferSink::new()));
        assert!(sink.routes_by_level());
    }
}

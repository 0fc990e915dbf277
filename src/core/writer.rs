//! Buffered multi-sink writer
//!
//! One log record is encoded into a single shared buffer, then fanned out to
//! every configured sink in order. The buffer-fill, flush and clear sequence
//! is the atomic unit of output; the logger holds its output lock around it.

use super::error::{LoggerError, Result};
use super::level::Level;
use crate::sinks::Sink;
use serde::{Deserialize, Serialize};
use std::io;

/// Per-sink colorization setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorOption {
    /// No color codes are injected. The default.
    #[default]
    Off,
    /// Color when the sink is attached to a terminal, plain otherwise.
    Auto,
    /// Color regardless of whether the sink is a terminal.
    Force,
}

/// ANSI escape pair for a level. The prefix is always five bytes
/// (`ESC [ 9x m`), which the strip logic in [`MultiWriter::flush`] relies on.
fn color_escape(level: Level) -> (String, &'static str) {
    (format!("\x1b[{}m", level.color().to_fg_str()), "\x1b[0m")
}

/// Owns the record buffer and the ordered sinks with their parallel color
/// settings.
pub struct MultiWriter {
    buf: Vec<u8>,
    sinks: Vec<Box<dyn Sink>>,
    colors: Vec<ColorOption>,
}

impl std::fmt::Debug for MultiWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiWriter")
            .field("buf", &self.buf)
            .field("sinks", &self.sinks.len())
            .field("colors", &self.colors)
            .finish()
    }
}

impl MultiWriter {
    /// Build a writer over `sinks` with parallel `colors` (padded with
    /// [`ColorOption::Off`] when shorter than the sink list).
    ///
    /// Color options are resolved eagerly: `Auto` or `Force` on a sink that
    /// cannot carry ANSI codes is a configuration error, and `Auto` on a
    /// capable sink that is not attached to a terminal downgrades to `Off`.
    /// This rejects bad setups before any record is written.
    pub fn new(sinks: Vec<Box<dyn Sink>>, colors: Vec<ColorOption>) -> Result<Self> {
        if sinks.is_empty() {
            return Err(LoggerError::config("MultiWriter", "empty sink list"));
        }

        let mut colors = colors;
        colors.resize(sinks.len(), ColorOption::Off);

        for (i, sink) in sinks.iter().enumerate() {
            match colors[i] {
                ColorOption::Off => {}
                ColorOption::Auto | ColorOption::Force => {
                    if !sink.is_terminal_capable() {
                        return Err(LoggerError::config(
                            "MultiWriter",
                            format!("cannot enable coloring of non-file sink #{}", i),
                        ));
                    }
                    if colors[i] == ColorOption::Auto && !sink.is_terminal() {
                        colors[i] = ColorOption::Off;
                    }
                }
            }
        }

        Ok(Self {
            buf: Vec::new(),
            sinks,
            colors,
        })
    }

    pub fn write(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_byte(&mut self, b: u8) {
        self.buf.push(b);
    }

    pub fn write_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Deliver the buffered record to every sink in order, then clear the
    /// buffer unconditionally. Returns the first sink error encountered;
    /// later sinks are still attempted.
    pub fn flush(&mut self, level: Level) -> Result<()> {
        let mut first_err: Option<io::Error> = None;

        for (i, sink) in self.sinks.iter_mut().enumerate() {
            let res = if sink.routes_by_level() {
                sink.level_write(level, &self.buf).map(|_| ())
            } else {
                let mut bytes: &[u8] = &self.buf;
                // Strip a pre-existing color wrapper before re-deciding.
                if bytes.first() == Some(&0x1b) && bytes.len() >= 9 {
                    bytes = &bytes[5..bytes.len() - 4];
                }
                if self.colors[i] == ColorOption::Off {
                    write_fully(sink.as_mut(), bytes)
                } else {
                    let (prefix, suffix) = color_escape(level);
                    write_fully(sink.as_mut(), prefix.as_bytes())
                        .and_then(|()| write_fully(sink.as_mut(), bytes))
                        .and_then(|()| write_fully(sink.as_mut(), suffix.as_bytes()))
                }
            };

            if let Err(e) = res {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }

        self.buf.clear();

        match first_err {
            Some(e) => Err(LoggerError::sink(e.to_string())),
            None => Ok(()),
        }
    }
}

fn write_fully(sink: &mut dyn Sink, mut buf: &[u8]) -> io::Result<()> {
    while !buf.is_empty() {
        let n = sink.write(buf)?;
        if n == 0 {
            return Err(io::ErrorKind::WriteZero.into());
        }
        buf = &buf[n..];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{BufferSink, FileSink, LeveledSink};
    use tempfile::TempDir;

    struct FailingSink;

    impl Sink for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn test_fan_out_in_order() {
        let a = BufferSink::new();
        let b = BufferSink::new();
        let mut writer = MultiWriter::new(
            vec![Box::new(a.clone()), Box::new(b.clone())],
            Vec::new(),
        )
        .unwrap();

        writer.write_str("hello\n");
        writer.flush(Level::Info).unwrap();

        assert_eq!(a.contents_string(), "hello\n");
        assert_eq!(b.contents_string(), "hello\n");
    }

    #[test]
    fn test_buffer_cleared_after_flush() {
        let a = BufferSink::new();
        let mut writer = MultiWriter::new(vec![Box::new(a.clone())], Vec::new()).unwrap();

        writer.write_str("one\n");
        writer.flush(Level::Info).unwrap();
        writer.write_str("two\n");
        writer.flush(Level::Info).unwrap();

        assert_eq!(a.contents_string(), "one\ntwo\n");
    }

    #[test]
    fn test_first_error_wins_and_buffer_clears() {
        let ok = BufferSink::new();
        let mut writer = MultiWriter::new(
            vec![Box::new(FailingSink), Box::new(ok.clone())],
            Vec::new(),
        )
        .unwrap();

        writer.write_str("record\n");
        let err = writer.flush(Level::Warn).unwrap_err();
        assert!(matches!(err, LoggerError::SinkError(_)));

        // The healthy sink was still attempted and the buffer is empty.
        assert_eq!(ok.contents_string(), "record\n");
        writer.write_str("next\n");
        writer.flush(Level::Warn).unwrap();
        assert_eq!(ok.contents_string(), "record\nnext\n");
    }

    #[test]
    fn test_empty_sink_list_rejected() {
        let err = MultiWriter::new(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_color_on_non_terminal_sink_rejected() {
        let err = MultiWriter::new(
            vec![Box::new(BufferSink::new())],
            vec![ColorOption::Force],
        )
        .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = MultiWriter::new(
            vec![Box::new(BufferSink::new())],
            vec![ColorOption::Auto],
        )
        .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_auto_downgrades_on_non_tty_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("out.log");
        let sink = FileSink::new(&path).unwrap();

        let mut writer =
            MultiWriter::new(vec![Box::new(sink)], vec![ColorOption::Auto]).unwrap();
        writer.write_str("plain\n");
        writer.flush(Level::Info).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "plain\n");
    }

    #[test]
    fn test_force_color_wraps_output() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("out.log");
        let sink = FileSink::new(&path).unwrap();

        let mut writer =
            MultiWriter::new(vec![Box::new(sink)], vec![ColorOption::Force]).unwrap();
        writer.write_str("colored\n");
        writer.flush(Level::Error).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("\x1b["));
        assert!(content.ends_with("\x1b[0m"));
        assert!(content.contains("colored"));
    }

    #[test]
    fn test_pre_colored_record_stripped_for_plain_sink() {
        let plain = BufferSink::new();
        let mut writer = MultiWriter::new(vec![Box::new(plain.clone())], Vec::new()).unwrap();

        writer.write_str("\x1b[91malready colored\n\x1b[0m");
        writer.flush(Level::Error).unwrap();

        assert_eq!(plain.contents_string(), "already colored\n");
    }

    #[test]
    fn test_leveled_sink_receives_level() {
        let default = BufferSink::new();
        let errors = BufferSink::new();
        let leveled = LeveledSink::new(Box::new(default.clone()))
            .with_override(Level::Error, Box::new(errors.clone()));

        let mut writer = MultiWriter::new(vec![Box::new(leveled)], Vec::new()).unwrap();
        writer.write_str("oops\n");
        writer.flush(Level::Error).unwrap();

        assert!(default.contents().is_empty());
        assert_eq!(errors.contents_string(), "oops\n");
    }
}

//! Standard stream sinks

use super::Sink;
use std::io::{self, IsTerminal, Write};

/// Sink writing to the process standard error stream. This is the default
/// output when a logger is built without explicit sinks.
#[derive(Debug, Default)]
pub struct StderrSink;

impl StderrSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for StderrSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().lock().flush()
    }

    fn is_terminal_capable(&self) -> bool {
        true
    }

    fn is_terminal(&self) -> bool {
        io::stderr().is_terminal()
    }
}

/// Sink writing to the process standard output stream.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for StdoutSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }

    fn is_terminal_capable(&self) -> bool {
        true
    }

    fn is_terminal(&self) -> bool {
        io::stdout().is_terminal()
    }
}

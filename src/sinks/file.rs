//! File sink

use super::Sink;
use crate::core::error::{LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Sink appending records to a file. The file is created if it does not
/// exist and is never rotated or closed by the logging core.
pub struct FileSink {
    file: File,
    path: String,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    path.display().to_string(),
                    e,
                )
            })?;

        Ok(Self {
            file,
            path: path.display().to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }

    fn is_terminal_capable(&self) -> bool {
        true
    }

    fn is_terminal(&self) -> bool {
        self.file.is_terminal()
    }
}

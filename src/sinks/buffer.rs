//! In-memory capture sink

use super::Sink;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// Sink collecting output into a shared in-memory buffer.
///
/// Clones share the same buffer, so a clone kept by the caller observes
/// everything the logger writes. This is the natural target for embedding
/// the logger in tests.
///
/// ```
/// use kvlog::sinks::{BufferSink, Sink};
///
/// let sink = BufferSink::new();
/// let mut writer_half = sink.clone();
/// writer_half.write(b"hello").unwrap();
/// assert_eq!(sink.contents(), b"hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.buf.lock().clone()
    }

    /// Snapshot as a string, replacing invalid UTF-8.
    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.buf.lock().clear();
    }
}

impl Sink for BufferSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(buf);
        Ok(buf.len())
    }
}

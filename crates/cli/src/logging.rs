//! Tracing setup with in-memory log capture.
//!
//! Every run publishes its own execution log to the workspace page, so the
//! subscriber writes formatted events both to the console and to a shared
//! buffer whose contents are handed to the Notion publisher at the end of
//! the run.

use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Shared in-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything captured so far, lossily decoded.
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

pub struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut bytes = self.inner.lock().expect("log buffer poisoned");
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Initialize the global subscriber: console layer plus capture layer.
pub fn init(default_filter: &str, buffer: LogBuffer) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(buffer),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_accumulates_writes() {
        let buffer = LogBuffer::new();
        let mut writer = buffer.make_writer();
        writer.write_all(b"first line\n").unwrap();
        writer.write_all(b"second line\n").unwrap();
        assert_eq!(buffer.contents(), "first line\nsecond line\n");
    }

    #[test]
    fn clones_share_the_same_sink() {
        let buffer = LogBuffer::new();
        let clone = buffer.clone();
        clone.make_writer().write_all(b"shared").unwrap();
        assert_eq!(buffer.contents(), "shared");
    }

    #[test]
    fn empty_buffer_reads_empty() {
        assert_eq!(LogBuffer::new().contents(), "");
    }
}

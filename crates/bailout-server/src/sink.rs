use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use bailout_config::{LogTarget, RecoveryConfig};

/// Destination for recovery boundary log lines
///
/// Writes are best effort: a sink must swallow its own I/O errors rather
/// than raising a second failure while a request is being recovered.
pub trait LogSink: fmt::Debug + Send + Sync {
    /// Write one complete log entry
    fn write(&self, line: &str);
}

/// Build the sink selected by configuration
pub fn from_config(config: &RecoveryConfig) -> Arc<dyn LogSink> {
    let prefix = config.prefix.clone();
    match config.sink {
        LogTarget::Tracing => Arc::new(TracingSink::new(prefix)),
        LogTarget::Stdout => Arc::new(WriterSink::stdout(prefix)),
        LogTarget::Stderr => Arc::new(WriterSink::stderr(prefix)),
    }
}

/// Sink that emits each entry as a `tracing` error event
#[derive(Debug, Clone)]
pub struct TracingSink {
    prefix: String,
}

impl TracingSink {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl LogSink for TracingSink {
    fn write(&self, line: &str) {
        tracing::error!(target: "bailout::recovery", "{}{line}", self.prefix);
    }
}

/// Sink that writes prefixed lines to any `Write`
#[derive(Debug)]
pub struct WriterSink<W> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout(prefix: impl Into<String>) -> Self {
        Self::new(prefix, io::stdout())
    }
}

impl WriterSink<io::Stderr> {
    pub fn stderr(prefix: impl Into<String>) -> Self {
        Self::new(prefix, io::stderr())
    }
}

impl<W: Write + Send + fmt::Debug> LogSink for WriterSink<W> {
    fn write(&self, line: &str) {
        let mut entry = format!("{}{line}", self.prefix);
        if !entry.ends_with('\n') {
            entry.push('\n');
        }

        // A poisoned lock only means another writer panicked mid-line
        let mut writer = self.writer.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let _ = writer.write_all(entry.as_bytes()).and_then(|()| writer.flush());
    }
}

/// Sink that keeps entries in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}

impl LogSink for MemorySink {
    fn write(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(line.to_owned());
    }
}

//! Explicit logging sinks for the generation core.
//!
//! Core functions never reach for a process-wide logger; they receive a `&dyn LogSink` and
//! report human-readable progress lines to it. Frontends pick the adapter: [`TracingLog`]
//! forwards to `tracing`, [`ChannelLog`] delivers lines to another thread (e.g. a UI loop),
//! and [`MemoryLog`] buffers lines for tests.

use std::fmt;
use std::sync::Mutex;
use std::sync::mpsc::Sender;

/// Severity of a log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Verbose diagnostics.
    Debug,
    /// Normal progress.
    Info,
    /// Recoverable or suspicious conditions.
    Warn,
    /// A stage or item failed.
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        })
    }
}

/// One emitted log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)
    }
}

/// Destination for human-readable progress lines.
///
/// Implementations must be cheap to call and must not fail; a sink that cannot deliver a line
/// drops it.
pub trait LogSink: Send + Sync {
    /// Deliver one line.
    fn log(&self, level: LogLevel, message: &str);

    /// Shorthand for [`LogLevel::Debug`].
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Shorthand for [`LogLevel::Info`].
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Shorthand for [`LogLevel::Warn`].
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Shorthand for [`LogLevel::Error`].
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Forwards every line to the `tracing` macros under the `quotereel` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "quotereel", "{message}"),
            LogLevel::Info => tracing::info!(target: "quotereel", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "quotereel", "{message}"),
            LogLevel::Error => tracing::error!(target: "quotereel", "{message}"),
        }
    }
}

/// Sends every line over an mpsc channel.
///
/// A receiver that has hung up is ignored, so a closed UI never aborts a running batch.
#[derive(Debug)]
pub struct ChannelLog {
    tx: Mutex<Sender<LogRecord>>,
}

impl ChannelLog {
    /// Wrap the sending half of a channel.
    pub fn new(tx: Sender<LogRecord>) -> Self {
        Self { tx: Mutex::new(tx) }
    }
}

impl LogSink for ChannelLog {
    fn log(&self, level: LogLevel, message: &str) {
        let record = LogRecord {
            level,
            message: message.to_owned(),
        };
        if let Ok(tx) = self.tx.lock() {
            let _ = tx.send(record);
        }
    }
}

/// Buffers every line in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLog {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all lines delivered so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Return `true` when some line at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.records()
            .iter()
            .any(|r| r.level == level && r.message.contains(needle))
    }

    /// Number of lines delivered at exactly `level`.
    pub fn count(&self, level: LogLevel) -> usize {
        self.records().iter().filter(|r| r.level == level).count()
    }
}

impl LogSink for MemoryLog {
    fn log(&self, level: LogLevel, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(LogRecord {
                level,
                message: message.to_owned(),
            });
        }
    }
}

/// Discards every line.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLog;

impl LogSink for NullLog {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/log.rs"]
mod tests;

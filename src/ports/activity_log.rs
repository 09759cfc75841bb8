//! Activity log port.
//!
//! The service owns one activity log and hands it to every handler through
//! application state. Appends never fail.

use serde_json::Value;

use crate::domain::activity::{LogEntry, LogLevel};

/// Bounded, newest-first log of service activity.
pub trait ActivityLog: Send + Sync {
    /// Appends an entry at the head, evicting the oldest past capacity.
    fn append(&self, entry: LogEntry);

    /// The most recent `limit` entries, newest first.
    fn recent(&self, limit: usize) -> Vec<LogEntry>;

    /// Number of entries currently held.
    fn len(&self) -> usize;

    /// Maximum number of entries held.
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&self, level: LogLevel, message: &str, data: Value) {
        self.append(LogEntry::new(level, message, data));
    }

    fn info(&self, message: &str, data: Value) {
        self.record(LogLevel::Info, message, data);
    }

    fn success(&self, message: &str, data: Value) {
        self.record(LogLevel::Success, message, data);
    }

    fn warning(&self, message: &str, data: Value) {
        self.record(LogLevel::Warning, message, data);
    }

    fn error(&self, message: &str, data: Value) {
        self.record(LogLevel::Error, message, data);
    }
}

//! In-memory activity log.
//!
//! Holds entries in a [`LogRing`] behind a mutex and mirrors every entry to
//! `tracing`, so the activity log and the process log always agree.

use std::sync::{Mutex, MutexGuard};

use crate::domain::activity::{LogEntry, LogLevel, LogRing, DEFAULT_CAPACITY};
use crate::ports::ActivityLog;

/// Process-local activity log; contents are lost on restart.
pub struct InMemoryActivityLog {
    ring: Mutex<LogRing>,
}

impl InMemoryActivityLog {
    /// Creates a log holding the default 100 entries.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a log holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ring: Mutex::new(LogRing::with_capacity(capacity)),
        }
    }

    // A push cannot leave the ring half-updated; poisoned locks are recovered.
    fn ring(&self) -> MutexGuard<'_, LogRing> {
        self.ring.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLog for InMemoryActivityLog {
    fn append(&self, entry: LogEntry) {
        mirror_to_tracing(&entry);
        self.ring().push(entry);
    }

    fn recent(&self, limit: usize) -> Vec<LogEntry> {
        self.ring().recent(limit)
    }

    fn len(&self) -> usize {
        self.ring().len()
    }

    fn capacity(&self) -> usize {
        self.ring().capacity()
    }
}

fn mirror_to_tracing(entry: &LogEntry) {
    let data = &entry.data;
    match entry.level {
        LogLevel::Info | LogLevel::Success => tracing::info!(
            level_tag = %entry.level,
            entry_id = %entry.id,
            %data,
            "{}",
            entry.message
        ),
        LogLevel::Warning => tracing::warn!(entry_id = %entry.id, %data, "{}", entry.message),
        LogLevel::Error => tracing::error!(entry_id = %entry.id, %data, "{}", entry.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::Arc;

    #[test]
    fn records_newest_first() {
        let log = InMemoryActivityLog::new();

        log.info("first", Value::Null);
        log.warning("second", json!({"customer": "cus_1"}));
        log.error("third", Value::Null);

        let entries = log.recent(10);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "third");
        assert_eq!(entries[0].level, LogLevel::Error);
        assert_eq!(entries[1].level, LogLevel::Warning);
        assert_eq!(entries[1].data["customer"], "cus_1");
        assert_eq!(entries[2].message, "first");
    }

    #[test]
    fn success_entries_keep_their_level() {
        let log = InMemoryActivityLog::new();
        log.success("Alert sent", Value::Null);
        assert_eq!(log.recent(1)[0].level, LogLevel::Success);
    }

    #[test]
    fn caps_at_one_hundred_entries() {
        let log = InMemoryActivityLog::new();
        for n in 1..=101 {
            log.info(&format!("entry {}", n), Value::Null);
        }

        assert_eq!(log.len(), 100);
        let entries = log.recent(100);
        assert_eq!(entries[0].message, "entry 101");
        assert!(entries.iter().all(|e| e.message != "entry 1"));
    }

    #[test]
    fn custom_capacity_is_respected() {
        let log = InMemoryActivityLog::with_capacity(3);
        for n in 0..10 {
            log.info(&n.to_string(), Value::Null);
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.capacity(), 3);
    }

    #[test]
    fn concurrent_appends_are_all_counted_up_to_capacity() {
        let log = Arc::new(InMemoryActivityLog::with_capacity(1000));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for n in 0..50 {
                        log.info(&format!("{}-{}", t, n), Value::Null);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(log.len(), 400);
    }

    #[test]
    fn empty_log_reports_empty() {
        let log = InMemoryActivityLog::new();
        assert!(log.is_empty());
        assert!(log.recent(50).is_empty());
    }
}

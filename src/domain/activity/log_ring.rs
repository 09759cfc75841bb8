//! Fixed-capacity, newest-first entry buffer.

use std::collections::VecDeque;

use super::log_entry::LogEntry;

/// Entries kept before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 100;

/// Entries returned when a reader does not ask for a specific number.
pub const DEFAULT_READ_LIMIT: usize = 50;

/// Bounded log: inserts at the head, evicts from the tail past capacity.
#[derive(Debug, Clone)]
pub struct LogRing {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogRing {
    /// Creates a ring holding at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Adds an entry at the head, evicting the oldest if full.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// The most recent `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<LogEntry> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LogRing {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

//! Activity log domain types.
//!
//! A bounded, newest-first record of what the service did, exposed over
//! `GET /logs`.

mod log_entry;
mod log_ring;

pub use log_entry::{LogEntry, LogLevel};
pub use log_ring::{LogRing, DEFAULT_CAPACITY, DEFAULT_READ_LIMIT};

//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ActivityLog` - Bounded in-memory activity log
//! - `CustomerDirectory` - Stripe customer lookups
//! - `MailTransport` - Outbound email delivery

mod activity_log;
mod customer_directory;
mod mail_transport;

pub use activity_log::ActivityLog;
pub use customer_directory::{CustomerDirectory, CustomerLookupError};
pub use mail_transport::{MailError, MailTransport, SentMessage};

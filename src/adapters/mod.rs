//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `activity_log` - In-memory activity log
//! - `gmail` - Gmail API mail transport
//! - `http` - Axum routes and handlers
//! - `stripe` - Stripe customer lookups

pub mod activity_log;
pub mod gmail;
pub mod http;
pub mod stripe;

pub use activity_log::InMemoryActivityLog;
pub use gmail::GmailTransport;
pub use stripe::StripeCustomerClient;

//! Application layer - Command handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    HandleStripeWebhookCommand, HandleStripeWebhookHandler, NotifyError, SendFailureAlertCommand,
    SendFailureAlertHandler, SendTestAlertHandler, SendTestAlertResult, WebhookOutcome,
};

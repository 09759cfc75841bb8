//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

pub mod alerts;

pub use alerts::{
    HandleStripeWebhookCommand, HandleStripeWebhookHandler, NotifyError, SendFailureAlertCommand,
    SendFailureAlertHandler, SendTestAlertHandler, SendTestAlertResult, WebhookOutcome,
};

//! Failed-payment alert handlers.
//!
//! ## Commands
//! - Processing Stripe webhook deliveries
//! - Sending an alert for a normalized failure
//! - Sending a synthetic test alert

mod handle_stripe_webhook;
mod send_failure_alert;
mod send_test_alert;

#[cfg(test)]
pub(crate) mod test_support;

pub use handle_stripe_webhook::{
    HandleStripeWebhookCommand, HandleStripeWebhookHandler, WebhookOutcome,
};
pub use send_failure_alert::{
    NotifyError, SendFailureAlertCommand, SendFailureAlertHandler,
};
pub use send_test_alert::{
    SendTestAlertHandler, SendTestAlertResult, TEST_CUSTOMER_EMAIL, TEST_CUSTOMER_ID,
    TEST_CUSTOMER_NAME,
};

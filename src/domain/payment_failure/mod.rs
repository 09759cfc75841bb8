//! Payment failure domain module.
//!
//! Turns authenticated Stripe webhook deliveries into alert emails.
//!
//! # Module Structure
//!
//! - `stripe_event` - Stripe event envelope and type tags
//! - `webhook_verifier` - `stripe-signature` verification
//! - `webhook_errors` - Authentication gate errors
//! - `failure_event` - Per-type classification and normalization
//! - `record` - The normalized failure record and customer reference
//! - `alert_email` - HTML template and MIME packaging

mod alert_email;
mod failure_event;
mod record;
mod stripe_event;
mod webhook_errors;
mod webhook_verifier;

pub use alert_email::{AlertEmail, MailAddressing};
pub use failure_event::{
    normalize, ChargeObject, FailureEvent, GenericObject, InvoiceObject, PaymentIntentObject,
    CARD_ERROR_TYPE,
};
pub use record::{
    format_minor_units, CustomerRecord, CustomerRef, LastPaymentError, PaymentFailureRecord,
    UNKNOWN_CUSTOMER,
};
pub use stripe_event::{StripeEvent, StripeEventBuilder, StripeEventData, StripeEventType};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{SignatureHeader, StripeWebhookVerifier, DEFAULT_TOLERANCE_SECS};

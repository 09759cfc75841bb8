//! HandleStripeWebhookHandler - Command handler for Stripe webhook deliveries.
//!
//! Pipeline: verify signature, filter by event type, normalize, enrich the
//! customer (best effort), notify. Only the signature gate can fail the
//! request; everything after it is recorded and reported as an outcome.

use std::sync::Arc;

use serde_json::json;

use super::send_failure_alert::{SendFailureAlertCommand, SendFailureAlertHandler};
use crate::domain::payment_failure::{
    normalize, PaymentFailureRecord, StripeEvent, StripeWebhookVerifier, WebhookError,
};
use crate::ports::{ActivityLog, CustomerDirectory};

/// Command to process one webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleStripeWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// Value of the `stripe-signature` header, if present.
    pub signature: Option<String>,
}

/// What happened to an authenticated event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Not a payment-failure event; nothing sent.
    Ignored { event_type: String },
    /// Alert email delivered.
    Notified { event_id: String, message_id: String },
    /// Alert email could not be delivered; the error has been recorded.
    NotificationFailed { event_id: String, error: String },
}

/// Handler for Stripe webhook deliveries.
pub struct HandleStripeWebhookHandler {
    verifier: Arc<StripeWebhookVerifier>,
    customer_directory: Arc<dyn CustomerDirectory>,
    activity_log: Arc<dyn ActivityLog>,
    notifier: SendFailureAlertHandler,
}

impl HandleStripeWebhookHandler {
    pub fn new(
        verifier: Arc<StripeWebhookVerifier>,
        customer_directory: Arc<dyn CustomerDirectory>,
        activity_log: Arc<dyn ActivityLog>,
        notifier: SendFailureAlertHandler,
    ) -> Self {
        Self {
            verifier,
            customer_directory,
            activity_log,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleStripeWebhookCommand,
    ) -> Result<WebhookOutcome, WebhookError> {
        // 1. Authenticate
        let event = self.authenticate(&cmd)?;

        self.activity_log.info(
            "Webhook received",
            json!({ "eventId": event.id, "eventType": event.event_type }),
        );

        // 2. Filter
        if !event.is_payment_failure() {
            self.activity_log.info(
                "Ignoring event type",
                json!({ "eventId": event.id, "eventType": event.event_type }),
            );
            return Ok(WebhookOutcome::Ignored {
                event_type: event.event_type,
            });
        }

        // 3. Normalize and enrich
        let record = self.enrich(normalize(&event)).await;

        // 4. Notify
        let event_id = event.id.clone();
        let outcome = match self
            .notifier
            .handle(SendFailureAlertCommand { event, record })
            .await
        {
            Ok(sent) => WebhookOutcome::Notified {
                event_id,
                message_id: sent.id,
            },
            Err(e) => WebhookOutcome::NotificationFailed {
                event_id,
                error: e.to_string(),
            },
        };

        Ok(outcome)
    }

    fn authenticate(&self, cmd: &HandleStripeWebhookCommand) -> Result<StripeEvent, WebhookError> {
        let result = match cmd.signature.as_deref() {
            Some(signature) => self.verifier.verify_and_parse(&cmd.payload, signature),
            None => Err(WebhookError::MissingSignature),
        };

        result.map_err(|e| {
            self.activity_log.error(
                "Webhook signature verification failed",
                json!({ "error": e.to_string() }),
            );
            e
        })
    }

    /// Replaces a bare customer id with the full record when the lookup succeeds.
    async fn enrich(&self, record: PaymentFailureRecord) -> PaymentFailureRecord {
        let Some(customer_id) = record.unresolved_customer_id().map(str::to_string) else {
            return record;
        };

        match self.customer_directory.find_customer(&customer_id).await {
            Ok(Some(customer)) => record.with_resolved_customer(customer),
            Ok(None) => {
                self.activity_log.warning(
                    "Customer not found; alerting without customer details",
                    json!({ "customerId": customer_id }),
                );
                record
            }
            Err(e) => {
                self.activity_log.warning(
                    "Customer lookup failed; alerting without customer details",
                    json!({ "customerId": customer_id, "error": e.to_string() }),
                );
                record
            }
        }
    }
}

//! SendTestAlertHandler - Sends a synthetic alert to check mail delivery.

use std::sync::Arc;

use serde_json::json;

use super::send_failure_alert::{NotifyError, SendFailureAlertCommand, SendFailureAlertHandler};
use crate::domain::payment_failure::{normalize, StripeEvent, StripeEventBuilder};
use crate::ports::ActivityLog;

pub const TEST_CUSTOMER_ID: &str = "cus_test_customer";
pub const TEST_CUSTOMER_NAME: &str = "Test Customer";
pub const TEST_CUSTOMER_EMAIL: &str = "test@example.com";

/// Result of a test alert.
#[derive(Debug, Clone)]
pub struct SendTestAlertResult {
    pub event_id: String,
    pub message_id: String,
}

/// Handler that runs the notify path against a fixed test-mode failure.
pub struct SendTestAlertHandler {
    notifier: SendFailureAlertHandler,
    activity_log: Arc<dyn ActivityLog>,
}

impl SendTestAlertHandler {
    pub fn new(notifier: SendFailureAlertHandler, activity_log: Arc<dyn ActivityLog>) -> Self {
        Self {
            notifier,
            activity_log,
        }
    }

    pub async fn handle(&self) -> Result<SendTestAlertResult, NotifyError> {
        let event = synthetic_event();

        self.activity_log.info(
            "Sending test alert",
            json!({ "eventId": event.id, "eventType": event.event_type }),
        );

        let record = normalize(&event);
        let event_id = event.id.clone();
        let sent = self
            .notifier
            .handle(SendFailureAlertCommand { event, record })
            .await?;

        Ok(SendTestAlertResult {
            event_id,
            message_id: sent.id,
        })
    }
}

/// A test-mode `payment_intent.payment_failed` event for the fixed test customer.
fn synthetic_event() -> StripeEvent {
    StripeEventBuilder::new()
        .id(format!("evt_test_{}", uuid::Uuid::new_v4().simple()))
        .event_type("payment_intent.payment_failed")
        .created(chrono::Utc::now().timestamp())
        .livemode(false)
        .object(json!({
            "id": "pi_test_payment",
            "object": "payment_intent",
            "customer": {
                "id": TEST_CUSTOMER_ID,
                "name": TEST_CUSTOMER_NAME,
                "email": TEST_CUSTOMER_EMAIL
            },
            "amount": 2500,
            "currency": "usd",
            "last_payment_error": {
                "code": "card_declined",
                "message": "Your card was declined.",
                "type": "card_error"
            }
        }))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::activity_log::InMemoryActivityLog;
    use crate::application::handlers::alerts::test_support::{addressing, RecordingMailTransport};
    use crate::domain::payment_failure::CustomerRef;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;

    #[test]
    fn synthetic_event_normalizes_to_fixed_failure() {
        let event = synthetic_event();
        let record = normalize(&event);

        assert!(event.id.starts_with("evt_test_"));
        assert!(!event.is_live());
        assert_eq!(record.amount, Some(2500));
        assert_eq!(record.currency.as_deref(), Some("usd"));
        assert_eq!(record.display_name(), TEST_CUSTOMER_NAME);
        assert!(matches!(
            record.customer,
            Some(CustomerRef::Resolved(ref c)) if c.id == TEST_CUSTOMER_ID
        ));
        let error = record.last_error.unwrap();
        assert_eq!(error.code.as_deref(), Some("card_declined"));
        assert_eq!(error.message.as_deref(), Some("Your card was declined."));
        assert_eq!(error.error_type.as_deref(), Some("card_error"));
    }

    #[tokio::test]
    async fn sends_test_customer_alert() {
        let transport = Arc::new(RecordingMailTransport::default());
        let log = Arc::new(InMemoryActivityLog::new());
        let notifier = SendFailureAlertHandler::new(transport.clone(), log.clone(), addressing());
        let handler = SendTestAlertHandler::new(notifier, log.clone());

        let result = handler.handle().await.unwrap();

        assert_eq!(result.message_id, "msg-1");
        let raw = transport.sent();
        let message = String::from_utf8(URL_SAFE_NO_PAD.decode(&raw[0]).unwrap()).unwrap();
        assert!(message.contains("Subject: Payment Failed: 25.00 USD - Test Customer\r\n"));
        assert!(message.contains("dashboard.stripe.com/test/events/evt_test_"));
    }

    #[tokio::test]
    async fn mail_failure_is_returned() {
        let transport = Arc::new(RecordingMailTransport::failing());
        let log = Arc::new(InMemoryActivityLog::new());
        let notifier = SendFailureAlertHandler::new(transport, log.clone(), addressing());
        let handler = SendTestAlertHandler::new(notifier, log.clone());

        let result = handler.handle().await;

        assert!(result.is_err());
        assert_eq!(log.len(), 2);
    }
}

//! SendFailureAlertHandler - Command handler for emailing one failure alert.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;

use crate::domain::payment_failure::{
    AlertEmail, MailAddressing, PaymentFailureRecord, StripeEvent,
};
use crate::ports::{ActivityLog, MailError, MailTransport, SentMessage};

/// Command to send an alert for a normalized failure.
#[derive(Debug, Clone)]
pub struct SendFailureAlertCommand {
    /// The event that reported the failure.
    pub event: StripeEvent,
    /// The normalized, possibly enriched, failure.
    pub record: PaymentFailureRecord,
}

/// Errors from sending an alert.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to build alert email: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("Failed to send alert email: {0}")]
    Mail(#[from] MailError),
}

/// Handler that renders the alert email and hands it to the mail transport.
///
/// Exactly one send is attempted. The outcome is recorded in the activity log
/// and returned to the caller either way.
pub struct SendFailureAlertHandler {
    mail_transport: Arc<dyn MailTransport>,
    activity_log: Arc<dyn ActivityLog>,
    addressing: MailAddressing,
}

impl SendFailureAlertHandler {
    pub fn new(
        mail_transport: Arc<dyn MailTransport>,
        activity_log: Arc<dyn ActivityLog>,
        addressing: MailAddressing,
    ) -> Self {
        Self {
            mail_transport,
            activity_log,
            addressing,
        }
    }

    pub async fn handle(&self, cmd: SendFailureAlertCommand) -> Result<SentMessage, NotifyError> {
        let email = AlertEmail::render(&cmd.event, &cmd.record, &self.addressing);
        let customer = cmd.record.display_name();

        let raw = match email.encoded_raw() {
            Ok(raw) => raw,
            Err(e) => {
                self.activity_log.error(
                    "Failed to build alert email",
                    json!({
                        "eventId": cmd.event.id,
                        "eventType": cmd.event.event_type,
                        "error": e.to_string(),
                    }),
                );
                return Err(e.into());
            }
        };

        match self.mail_transport.send_raw(&raw).await {
            Ok(sent) => {
                self.activity_log.success(
                    "Alert email sent",
                    json!({
                        "eventId": cmd.event.id,
                        "eventType": cmd.event.event_type,
                        "customer": customer,
                        "messageId": sent.id,
                    }),
                );
                Ok(sent)
            }
            Err(e) => {
                self.activity_log.error(
                    "Failed to send alert email",
                    json!({
                        "eventId": cmd.event.id,
                        "eventType": cmd.event.event_type,
                        "error": e.to_string(),
                    }),
                );
                Err(e.into())
            }
        }
    }
}

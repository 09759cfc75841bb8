//! Mail transport port.
//!
//! Delivers a fully-formed RFC 822 message. The message is handed over already
//! base64url-encoded, the way the Gmail API accepts it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for outbound email.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Sends one message. No retries are attempted.
    async fn send_raw(&self, raw_message: &str) -> Result<SentMessage, MailError>;
}

/// Receipt for a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
}

/// Errors from the mail transport.
#[derive(Debug, Error)]
pub enum MailError {
    /// Obtaining an access token failed.
    #[error("Mail authentication failed: {0}")]
    Authentication(String),

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("Mail API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Invalid mail API response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mail_transport_is_object_safe() {
        fn _accepts_dyn(_transport: &dyn MailTransport) {}
    }

    #[test]
    fn sent_message_deserializes_gmail_response() {
        let sent: SentMessage =
            serde_json::from_str(r#"{"id":"18c2","threadId":"18c2","labelIds":["SENT"]}"#).unwrap();
        assert_eq!(sent.id, "18c2");
        assert_eq!(sent.thread_id.as_deref(), Some("18c2"));
    }
}

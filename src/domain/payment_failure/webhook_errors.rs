//! Webhook authentication errors.
//!
//! Every variant is terminal for the request: the event is not trusted and
//! nothing downstream runs.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that reject an inbound webhook at the authentication gate.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The `stripe-signature` header was absent or not valid UTF-8.
    #[error("No stripe-signature header value was provided")]
    MissingSignature,

    /// No v1 signature in the header matched the payload.
    #[error("No signatures found matching the expected signature for payload")]
    InvalidSignature,

    /// Webhook timestamp is older than the configured tolerance.
    #[error("Timestamp outside the tolerance zone")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance.
    #[error("Timestamp is in the future")]
    InvalidTimestamp,

    /// Failed to parse the signature header or the signed payload.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl WebhookError {
    /// Maps the error to the HTTP status returned to Stripe.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_signature_displays_correctly() {
        let err = WebhookError::InvalidSignature;
        assert_eq!(
            format!("{}", err),
            "No signatures found matching the expected signature for payload"
        );
    }

    #[test]
    fn missing_signature_displays_correctly() {
        let err = WebhookError::MissingSignature;
        assert_eq!(
            format!("{}", err),
            "No stripe-signature header value was provided"
        );
    }

    #[test]
    fn parse_error_displays_message() {
        let err = WebhookError::ParseError("invalid JSON".to_string());
        assert_eq!(format!("{}", err), "Parse error: invalid JSON");
    }

    #[test]
    fn every_variant_returns_bad_request() {
        let errors = [
            WebhookError::MissingSignature,
            WebhookError::InvalidSignature,
            WebhookError::TimestampOutOfRange,
            WebhookError::InvalidTimestamp,
            WebhookError::ParseError("x".to_string()),
        ];

        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }
}

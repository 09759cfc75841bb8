//! Stripe webhook event types.
//!
//! Defines the envelope shared by every Stripe webhook payload.
//! Only fields relevant to alerting are captured.

use serde::{Deserialize, Serialize};

/// Stripe webhook event (simplified).
///
/// Additional fields from Stripe's full event schema are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "invoice.payment_failed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp).
    pub created: i64,

    /// Object containing event-specific data.
    pub data: StripeEventData,

    /// Whether this is a live mode event (vs test mode).
    #[serde(default)]
    pub livemode: bool,

    /// API version used to render this event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event (polymorphic based on event type).
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Returns true if this is a live mode event.
    pub fn is_live(&self) -> bool {
        self.livemode
    }

    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> StripeEventType {
        StripeEventType::from_str(&self.event_type)
    }

    /// Returns true if this event reports a failed payment.
    pub fn is_payment_failure(&self) -> bool {
        self.parsed_type().is_payment_failure()
    }

    /// Attempts to deserialize the data object as the specified type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data.object)
    }

    /// Link to this event in the Stripe dashboard.
    pub fn dashboard_url(&self) -> String {
        if self.livemode {
            format!("https://dashboard.stripe.com/events/{}", self.id)
        } else {
            format!("https://dashboard.stripe.com/test/events/{}", self.id)
        }
    }
}

/// Stripe event types the alerting pipeline distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeEventType {
    /// A PaymentIntent failed to confirm.
    PaymentIntentPaymentFailed,
    /// An invoice payment attempt failed.
    InvoicePaymentFailed,
    /// A charge attempt failed.
    ChargeFailed,
    /// Any other event type.
    Other,
}

impl StripeEventType {
    /// Parse event type from string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "payment_intent.payment_failed" => Self::PaymentIntentPaymentFailed,
            "invoice.payment_failed" => Self::InvoicePaymentFailed,
            "charge.failed" => Self::ChargeFailed,
            _ => Self::Other,
        }
    }

    /// Convert to the Stripe event type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PaymentIntentPaymentFailed => "payment_intent.payment_failed",
            Self::InvoicePaymentFailed => "invoice.payment_failed",
            Self::ChargeFailed => "charge.failed",
            Self::Other => "other",
        }
    }

    /// Whether events of this type trigger an alert.
    pub fn is_payment_failure(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Builder for creating StripeEvent instances in tests and synthetic triggers.
pub struct StripeEventBuilder {
    id: String,
    event_type: String,
    created: i64,
    object: serde_json::Value,
    livemode: bool,
    api_version: Option<String>,
}

impl Default for StripeEventBuilder {
    fn default() -> Self {
        Self {
            id: "evt_test_123".to_string(),
            event_type: "payment_intent.payment_failed".to_string(),
            created: chrono::Utc::now().timestamp(),
            object: serde_json::json!({}),
            livemode: false,
            api_version: None,
        }
    }
}

impl StripeEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn created(mut self, created: i64) -> Self {
        self.created = created;
        self
    }

    pub fn object(mut self, object: serde_json::Value) -> Self {
        self.object = object;
        self
    }

    pub fn livemode(mut self, livemode: bool) -> Self {
        self.livemode = livemode;
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn build(self) -> StripeEvent {
        StripeEvent {
            id: self.id,
            event_type: self.event_type,
            created: self.created,
            data: StripeEventData {
                object: self.object,
            },
            livemode: self.livemode,
            api_version: self.api_version,
        }
    }
}

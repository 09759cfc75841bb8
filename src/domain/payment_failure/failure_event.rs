//! Event normalization.
//!
//! A Stripe event is first classified into a [`FailureEvent`], one variant per
//! event type, each carrying its own strongly-typed object. Normalization is an
//! exhaustive mapping from those variants to a [`PaymentFailureRecord`].
//!
//! Classification never fails: an object that does not match its variant's
//! shape is read leniently as a [`GenericObject`].

use serde::Deserialize;
use serde_json::Value;

use super::record::{CustomerRecord, CustomerRef, LastPaymentError, PaymentFailureRecord};
use super::stripe_event::{StripeEvent, StripeEventType};

/// Error type tag Stripe uses for charge-level declines.
pub const CARD_ERROR_TYPE: &str = "card_error";

/// `data.object` of a `payment_intent.payment_failed` event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentIntentObject {
    pub customer: Option<CustomerRef>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub last_payment_error: Option<LastPaymentError>,
}

/// `data.object` of an `invoice.payment_failed` event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InvoiceObject {
    pub customer: Option<CustomerRef>,
    pub amount_due: Option<i64>,
    pub currency: Option<String>,
    pub last_payment_error: Option<LastPaymentError>,
}

/// `data.object` of a `charge.failed` event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChargeObject {
    pub customer: Option<CustomerRef>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub failure_code: Option<String>,
    pub failure_message: Option<String>,
}

/// Best-effort view of any other object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericObject {
    pub customer: Option<CustomerRef>,
    pub amount: Option<i64>,
    pub amount_due: Option<i64>,
    pub currency: Option<String>,
    pub last_payment_error: Option<LastPaymentError>,
}

impl GenericObject {
    /// Reads whatever recognisable fields the value holds; never fails.
    pub fn from_value(value: &Value) -> Self {
        Self {
            customer: value.get("customer").and_then(lenient_customer),
            amount: value.get("amount").and_then(Value::as_i64),
            amount_due: value.get("amount_due").and_then(Value::as_i64),
            currency: value
                .get("currency")
                .and_then(Value::as_str)
                .map(str::to_string),
            last_payment_error: value
                .get("last_payment_error")
                .and_then(|v| LastPaymentError::deserialize(v).ok()),
        }
    }
}

/// A payment-failure event, tagged by its Stripe event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureEvent {
    PaymentIntent(PaymentIntentObject),
    Invoice(InvoiceObject),
    Charge(ChargeObject),
    Other(GenericObject),
}

impl FailureEvent {
    /// Classifies an event by type, validating its object against that type's shape.
    pub fn classify(event: &StripeEvent) -> Self {
        let typed = match event.parsed_type() {
            StripeEventType::PaymentIntentPaymentFailed => {
                event.deserialize_object().map(Self::PaymentIntent)
            }
            StripeEventType::InvoicePaymentFailed => event.deserialize_object().map(Self::Invoice),
            StripeEventType::ChargeFailed => event.deserialize_object().map(Self::Charge),
            StripeEventType::Other => {
                return Self::Other(GenericObject::from_value(&event.data.object))
            }
        };

        typed.unwrap_or_else(|e| {
            tracing::debug!(
                event_id = %event.id,
                event_type = %event.event_type,
                error = %e,
                "Event object did not match its type; reading it leniently"
            );
            Self::Other(GenericObject::from_value(&event.data.object))
        })
    }

    /// Maps the variant to the uniform record.
    pub fn normalize(self) -> PaymentFailureRecord {
        match self {
            FailureEvent::PaymentIntent(pi) => PaymentFailureRecord {
                customer: pi.customer,
                amount: pi.amount,
                currency: pi.currency,
                last_error: pi.last_payment_error,
            },
            FailureEvent::Invoice(invoice) => PaymentFailureRecord {
                customer: invoice.customer,
                amount: invoice.amount_due,
                currency: invoice.currency,
                last_error: invoice.last_payment_error,
            },
            FailureEvent::Charge(charge) => {
                let last_error = charge.failure_code.map(|code| LastPaymentError {
                    code: Some(code),
                    message: charge.failure_message,
                    error_type: Some(CARD_ERROR_TYPE.to_string()),
                });
                PaymentFailureRecord {
                    customer: charge.customer,
                    amount: charge.amount,
                    currency: charge.currency,
                    last_error,
                }
            }
            FailureEvent::Other(generic) => PaymentFailureRecord {
                customer: generic.customer,
                amount: generic.amount.or(generic.amount_due),
                currency: generic.currency,
                last_error: generic.last_payment_error,
            },
        }
    }
}

/// Normalizes any Stripe event into a payment-failure record.
pub fn normalize(event: &StripeEvent) -> PaymentFailureRecord {
    FailureEvent::classify(event).normalize()
}

fn lenient_customer(value: &Value) -> Option<CustomerRef> {
    match value {
        Value::String(id) => Some(CustomerRef::Id(id.clone())),
        Value::Object(_) => CustomerRecord::deserialize(value)
            .ok()
            .map(CustomerRef::Resolved),
        _ => None,
    }
}

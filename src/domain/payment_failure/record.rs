//! The normalized payment-failure record and its customer reference.

use serde::{Deserialize, Serialize};

/// Placeholder shown when neither a customer name nor an email is known.
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

/// A Stripe customer as returned by the Customers API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Customer field of a payment object: a bare `cus_...` id, or the expanded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerRef {
    Id(String),
    Resolved(CustomerRecord),
}

impl CustomerRef {
    /// The Stripe customer id, whichever form this reference takes.
    pub fn id(&self) -> &str {
        match self {
            CustomerRef::Id(id) => id,
            CustomerRef::Resolved(record) => &record.id,
        }
    }

    /// The full record, if this reference has been resolved.
    pub fn record(&self) -> Option<&CustomerRecord> {
        match self {
            CustomerRef::Id(_) => None,
            CustomerRef::Resolved(record) => Some(record),
        }
    }
}

/// Structured decline information attached to a failed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPaymentError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

/// Uniform view of a failed payment, whatever event type reported it.
///
/// Lives only for the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFailureRecord {
    pub customer: Option<CustomerRef>,
    /// Amount in minor currency units (cents).
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub last_error: Option<LastPaymentError>,
}

impl PaymentFailureRecord {
    /// Replaces the customer reference with a resolved record.
    pub fn with_resolved_customer(self, record: CustomerRecord) -> Self {
        Self {
            customer: Some(CustomerRef::Resolved(record)),
            ..self
        }
    }

    /// Customer id still awaiting a lookup, if the reference is a bare id.
    pub fn unresolved_customer_id(&self) -> Option<&str> {
        match &self.customer {
            Some(CustomerRef::Id(id)) if !id.is_empty() => Some(id),
            _ => None,
        }
    }

    /// Customer name, falling back to email, then to a fixed placeholder.
    pub fn display_name(&self) -> &str {
        let record = self.customer.as_ref().and_then(CustomerRef::record);
        record
            .and_then(|r| non_empty(r.name.as_deref()))
            .or_else(|| record.and_then(|r| non_empty(r.email.as_deref())))
            .unwrap_or(UNKNOWN_CUSTOMER)
    }

    /// Customer email, when the record has been resolved.
    pub fn customer_email(&self) -> Option<&str> {
        self.customer
            .as_ref()
            .and_then(CustomerRef::record)
            .and_then(|r| non_empty(r.email.as_deref()))
    }

    /// Human-readable amount ("25.00"), or `None` if the event carried no amount.
    pub fn formatted_amount(&self) -> Option<String> {
        self.amount.map(format_minor_units)
    }

    /// Upper-cased ISO currency code, or an empty string.
    pub fn currency_code(&self) -> String {
        self.currency
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_default()
    }
}

/// Formats an amount in minor units as major units with two decimals.
pub fn format_minor_units(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

//! Customer directory port.
//!
//! Resolves a Stripe customer id to the full customer record so alerts can
//! name the customer.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::payment_failure::CustomerRecord;

/// Port for customer lookups.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// Fetches a customer by id.
    ///
    /// Returns `Ok(None)` if the customer does not exist or has been deleted.
    async fn find_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<CustomerRecord>, CustomerLookupError>;
}

/// Errors from a customer lookup.
#[derive(Debug, Error)]
pub enum CustomerLookupError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("Customer API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Invalid customer response: {0}")]
    InvalidResponse(String),
}

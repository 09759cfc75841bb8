//! Stripe customer lookups.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::payment_failure::CustomerRecord;
use crate::ports::{CustomerDirectory, CustomerLookupError};

/// Default base URL for the Stripe API.
const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Customer object as returned by `GET /v1/customers/{id}`.
#[derive(Debug, Deserialize)]
struct StripeCustomer {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    deleted: bool,
}

/// `CustomerDirectory` backed by the Stripe Customers API.
pub struct StripeCustomerClient {
    api_key: SecretString,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl StripeCustomerClient {
    /// Creates a client using the given secret key.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl CustomerDirectory for StripeCustomerClient {
    async fn find_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<CustomerRecord>, CustomerLookupError> {
        let mut url = reqwest::Url::parse(&self.api_base_url)
            .map_err(|e| CustomerLookupError::Network(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| {
                CustomerLookupError::Network(format!(
                    "{} cannot carry a path",
                    self.api_base_url
                ))
            })?
            .pop_if_empty()
            .extend(["v1", "customers", customer_id]);

        tracing::debug!(customer_id, "Fetching Stripe customer");

        let response = self
            .http_client
            .get(url)
            .basic_auth(self.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| CustomerLookupError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status, error = %error_text, "Stripe customer lookup failed");
            return Err(CustomerLookupError::Api {
                status,
                message: error_text,
            });
        }

        let customer: StripeCustomer = response
            .json()
            .await
            .map_err(|e| CustomerLookupError::InvalidResponse(e.to_string()))?;

        if customer.deleted {
            return Ok(None);
        }

        Ok(Some(CustomerRecord {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
        }))
    }
}

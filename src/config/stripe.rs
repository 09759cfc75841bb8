//! Stripe configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Stripe configuration (customer lookups and webhook verification)
#[derive(Debug, Clone, Deserialize)]
pub struct StripeConfig {
    /// Stripe secret API key
    pub api_key: SecretString,

    /// Stripe webhook signing secret
    pub webhook_secret: SecretString,

    /// Base URL for the Stripe REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Maximum accepted age of a webhook signature timestamp, in seconds
    #[serde(default = "default_webhook_tolerance")]
    pub webhook_tolerance_secs: i64,
}

impl StripeConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.api_key.expose_secret().starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.api_key.expose_secret().starts_with("sk_live_")
    }

    /// Validate Stripe configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let api_key = self.api_key.expose_secret();
        let webhook_secret = self.webhook_secret.expose_secret();

        if api_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE__API_KEY"));
        }
        if webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE__WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !api_key.starts_with("sk_") && !api_key.starts_with("rk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        if !(1..=3600).contains(&self.webhook_tolerance_secs) {
            return Err(ValidationError::InvalidWebhookTolerance);
        }
        if !self.api_base_url.starts_with("http") {
            return Err(ValidationError::InvalidUrl("STRIPE__API_BASE_URL"));
        }

        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}

fn default_webhook_tolerance() -> i64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str, webhook_secret: &str) -> StripeConfig {
        StripeConfig {
            api_key: SecretString::new(api_key.to_string()),
            webhook_secret: SecretString::new(webhook_secret.to_string()),
            api_base_url: default_api_base_url(),
            webhook_tolerance_secs: default_webhook_tolerance(),
        }
    }

    #[test]
    fn test_is_test_mode() {
        let config = config("sk_test_xxx", "whsec_xxx");
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_is_live_mode() {
        let config = config("sk_live_xxx", "whsec_xxx");
        assert!(config.is_live_mode());
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_validation_missing_api_key() {
        assert!(matches!(
            config("", "whsec_xxx").validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validation_missing_webhook_secret() {
        assert!(matches!(
            config("sk_test_xxx", "").validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validation_invalid_api_key_prefix() {
        assert!(matches!(
            config("pk_test_xxx", "whsec_xxx").validate(),
            Err(ValidationError::InvalidStripeKey)
        ));
    }

    #[test]
    fn test_validation_invalid_webhook_secret_prefix() {
        assert!(matches!(
            config("sk_test_xxx", "secret_xxx").validate(),
            Err(ValidationError::InvalidStripeWebhookSecret)
        ));
    }

    #[test]
    fn test_validation_invalid_tolerance() {
        let mut config = config("sk_test_xxx", "whsec_xxx");
        config.webhook_tolerance_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidWebhookTolerance)
        ));
    }

    #[test]
    fn test_validation_restricted_key_accepted() {
        assert!(config("rk_live_abcd", "whsec_xyz").validate().is_ok());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config("sk_test_abcd1234", "whsec_xyz789").validate().is_ok());
    }
}

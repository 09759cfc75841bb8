//! Gmail API configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// OAuth client credentials and refresh token for the sending Gmail account
#[derive(Debug, Clone, Deserialize)]
pub struct GmailConfig {
    /// OAuth client ID
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: SecretString,

    /// Long-lived refresh token for the sending account
    pub refresh_token: SecretString,

    /// OAuth token endpoint
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Base URL for the Gmail REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl GmailConfig {
    /// Validate Gmail configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.client_id.is_empty() {
            return Err(ValidationError::MissingRequired("GMAIL__CLIENT_ID"));
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("GMAIL__CLIENT_SECRET"));
        }
        if self.refresh_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("GMAIL__REFRESH_TOKEN"));
        }
        if !self.token_url.starts_with("http") {
            return Err(ValidationError::InvalidUrl("GMAIL__TOKEN_URL"));
        }
        if !self.api_base_url.starts_with("http") {
            return Err(ValidationError::InvalidUrl("GMAIL__API_BASE_URL"));
        }
        Ok(())
    }
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_api_base_url() -> String {
    "https://gmail.googleapis.com".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> GmailConfig {
        GmailConfig {
            client_id: "123.apps.googleusercontent.com".to_string(),
            client_secret: SecretString::new("secret".to_string()),
            refresh_token: SecretString::new("1//token".to_string()),
            token_url: default_token_url(),
            api_base_url: default_api_base_url(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_refresh_token() {
        let config = GmailConfig {
            refresh_token: SecretString::new(String::new()),
            ..valid()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("GMAIL__REFRESH_TOKEN"))
        ));
    }

    #[test]
    fn test_validation_missing_client_id() {
        let config = GmailConfig {
            client_id: String::new(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_token_url() {
        let config = GmailConfig {
            token_url: "oauth2.googleapis.com/token".to_string(),
            ..valid()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidUrl(_))));
    }
}

//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FAILED_PAYMENT_ALERTS` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use failed_payment_alerts::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod alerts;
mod error;
mod gmail;
mod server;
mod stripe;

pub use alerts::AlertsConfig;
pub use error::{ConfigError, ValidationError};
pub use gmail::GmailConfig;
pub use server::{Environment, ServerConfig};
pub use stripe::StripeConfig;

use serde::Deserialize;

/// Environment variable prefix for all settings.
const ENV_PREFIX: &str = "FAILED_PAYMENT_ALERTS";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Stripe API and webhook configuration
    pub stripe: StripeConfig,

    /// Gmail API credentials
    pub gmail: GmailConfig,

    /// Alert sender/recipient addresses
    pub alerts: AlertsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FAILED_PAYMENT_ALERTS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Lets a bare `PORT` variable override `server.port`
    ///
    /// # Environment Variable Format
    ///
    /// - `FAILED_PAYMENT_ALERTS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FAILED_PAYMENT_ALERTS__STRIPE__API_KEY=...` -> `stripe.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values cannot be
    /// parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.stripe.validate()?;
        self.gmail.validate()?;
        self.alerts.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[(&str, &str)] = &[
        ("FAILED_PAYMENT_ALERTS__STRIPE__API_KEY", "sk_test_xxx"),
        ("FAILED_PAYMENT_ALERTS__STRIPE__WEBHOOK_SECRET", "whsec_xxx"),
        ("FAILED_PAYMENT_ALERTS__GMAIL__CLIENT_ID", "client.apps.googleusercontent.com"),
        ("FAILED_PAYMENT_ALERTS__GMAIL__CLIENT_SECRET", "gmail-secret"),
        ("FAILED_PAYMENT_ALERTS__GMAIL__REFRESH_TOKEN", "1//refresh"),
        ("FAILED_PAYMENT_ALERTS__ALERTS__FROM_EMAIL", "alerts@example.com"),
        ("FAILED_PAYMENT_ALERTS__ALERTS__TO_EMAIL", "billing@example.com"),
    ];

    fn set_minimal_env() {
        for (key, value) in VARS {
            env::set_var(key, value);
        }
    }

    fn clear_env() {
        for (key, _) in VARS {
            env::remove_var(key);
        }
        env::remove_var("FAILED_PAYMENT_ALERTS__SERVER__PORT");
        env::remove_var("FAILED_PAYMENT_ALERTS__SERVER__ENVIRONMENT");
        env::remove_var("PORT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.stripe.api_key.expose_secret(), "sk_test_xxx");
        assert_eq!(config.alerts.to_email, "billing@example.com");
        assert_eq!(config.gmail.refresh_token.expose_secret(), "1//refresh");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.stripe.webhook_tolerance_secs, 300);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FAILED_PAYMENT_ALERTS__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FAILED_PAYMENT_ALERTS__SERVER__PORT", "4000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_bare_port_overrides_prefixed_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FAILED_PAYMENT_ALERTS__SERVER__PORT", "4000");
        env::set_var("PORT", "5050");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 5050);
    }

    #[test]
    fn test_missing_stripe_section_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::remove_var("FAILED_PAYMENT_ALERTS__STRIPE__API_KEY");
        env::remove_var("FAILED_PAYMENT_ALERTS__STRIPE__WEBHOOK_SECRET");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }
}

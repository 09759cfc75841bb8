//! Alert email addressing

use lettre::message::Mailbox;
use lettre::Address;
use serde::Deserialize;

use super::error::ValidationError;

/// Sender and recipient of failed-payment alerts
#[derive(Debug, Clone, Deserialize)]
pub struct AlertsConfig {
    /// From email address (the authorised Gmail account)
    pub from_email: String,

    /// Recipient of every alert
    pub to_email: String,

    /// Display name on the From header
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl AlertsConfig {
    /// Sender mailbox, display name included
    pub fn from_mailbox(&self) -> Result<Mailbox, ValidationError> {
        let address = self
            .from_email
            .parse::<Address>()
            .map_err(|_| ValidationError::InvalidFromEmail)?;
        Ok(Mailbox::new(Some(self.from_name.clone()), address))
    }

    /// Recipient mailbox
    pub fn to_mailbox(&self) -> Result<Mailbox, ValidationError> {
        let address = self
            .to_email
            .parse::<Address>()
            .map_err(|_| ValidationError::InvalidToEmail)?;
        Ok(Mailbox::new(None, address))
    }

    /// Validate alert addressing
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.from_email.is_empty() {
            return Err(ValidationError::MissingRequired("ALERTS__FROM_EMAIL"));
        }
        if self.to_email.is_empty() {
            return Err(ValidationError::MissingRequired("ALERTS__TO_EMAIL"));
        }
        self.from_mailbox()?;
        self.to_mailbox()?;
        Ok(())
    }
}

fn default_from_name() -> String {
    "Payment Alerts".to_string()
}

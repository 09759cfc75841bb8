//! In-memory port doubles shared by the alert handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use lettre::message::Mailbox;

use crate::domain::payment_failure::{CustomerRecord, MailAddressing};
use crate::ports::{
    CustomerDirectory, CustomerLookupError, MailError, MailTransport, SentMessage,
};

pub fn addressing() -> MailAddressing {
    MailAddressing {
        from: Mailbox::new(
            Some("Payment Alerts".to_string()),
            "alerts@example.com".parse().unwrap(),
        ),
        to: Mailbox::new(None, "billing@example.com".parse().unwrap()),
    }
}

/// Records every raw message; optionally fails every send.
#[derive(Default)]
pub struct RecordingMailTransport {
    sent: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingMailTransport {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send_raw(&self, raw_message: &str) -> Result<SentMessage, MailError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(raw_message.to_string());
        if self.fail {
            return Err(MailError::Api {
                status: 500,
                message: "backend unavailable".to_string(),
            });
        }
        Ok(SentMessage {
            id: format!("msg-{}", sent.len()),
            thread_id: None,
        })
    }
}

/// Serves customers from a fixed map; optionally fails every lookup.
#[derive(Default)]
pub struct StaticCustomerDirectory {
    customers: HashMap<String, CustomerRecord>,
    fail: bool,
    lookups: Mutex<Vec<String>>,
}

impl StaticCustomerDirectory {
    pub fn with_customer(record: CustomerRecord) -> Self {
        let mut customers = HashMap::new();
        customers.insert(record.id.clone(), record);
        Self {
            customers,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl CustomerDirectory for StaticCustomerDirectory {
    async fn find_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<CustomerRecord>, CustomerLookupError> {
        self.lookups.lock().unwrap().push(customer_id.to_string());
        if self.fail {
            return Err(CustomerLookupError::Network("connection refused".to_string()));
        }
        Ok(self.customers.get(customer_id).cloned())
    }
}

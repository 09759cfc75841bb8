//! Gmail adapters.
//!
//! Implements the `MailTransport` port against the Gmail REST API, authorising
//! with an OAuth refresh token.

mod gmail_transport;

pub use gmail_transport::GmailTransport;

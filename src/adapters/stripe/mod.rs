//! Stripe adapters.
//!
//! Implements the `CustomerDirectory` port against the Stripe Customers API.
//!
//! # Security
//!
//! - The secret key is held as `secrecy::SecretString` and only exposed when
//!   building the request's basic-auth header

mod customer_client;

pub use customer_client::StripeCustomerClient;

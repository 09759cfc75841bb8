//! Failed Payment Alerts - Stripe webhook receiver for payment failures
//!
//! Verifies Stripe webhook deliveries, normalizes payment-failure events,
//! enriches them with customer details and emails an alert through Gmail.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `activity` - Bounded activity log exposed to operators
//! - `payment_failure` - Webhook verification, normalization and alert rendering

pub mod activity;
pub mod payment_failure;

//! HTTP adapters - REST API implementations.

pub mod alerts;

pub use alerts::{alerts_router, AlertsAppState};

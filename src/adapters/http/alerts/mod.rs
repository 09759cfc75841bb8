//! HTTP adapter for the alerting service.
//!
//! - `GET /` - Service descriptor
//! - `GET /health` - Liveness and activity log size
//! - `GET /logs` - Recent activity log entries
//! - `POST /test` - Send a synthetic alert
//! - `POST /webhook` - Receive Stripe webhooks

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{AlertsAppState, WebhookApiError};
pub use routes::alerts_router;

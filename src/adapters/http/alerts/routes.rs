//! Axum router configuration for the alerting endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_logs, handle_stripe_webhook, health, send_test_alert, service_info, AlertsAppState,
};

/// Create the alerting service router.
///
/// # Routes
///
/// ## Status Endpoints
/// - `GET /` - Service descriptor
/// - `GET /health` - Liveness and activity log size
/// - `GET /logs` - Recent activity log entries
///
/// ## Command Endpoints
/// - `POST /test` - Send a synthetic alert
///
/// ## Webhook Endpoints (no auth, signature verified)
/// - `POST /webhook` - Handle Stripe webhooks
pub fn alerts_router() -> Router<AlertsAppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/logs", get(get_logs))
        .route("/test", post(send_test_alert))
        .route("/webhook", post(handle_stripe_webhook))
}

//! HTTP handlers for the alerting endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use chrono::Utc;

use crate::application::handlers::alerts::{
    HandleStripeWebhookCommand, HandleStripeWebhookHandler, SendFailureAlertHandler,
    SendTestAlertHandler, WebhookOutcome,
};
use crate::domain::activity::DEFAULT_READ_LIMIT;
use crate::domain::payment_failure::{MailAddressing, StripeWebhookVerifier, WebhookError};
use crate::ports::{ActivityLog, CustomerDirectory, MailTransport};

use super::dto::{
    HealthResponse, LogsQuery, LogsResponse, ServiceInfoResponse, TestAlertResponse,
    WebhookAckResponse,
};

/// Header Stripe puts the signature in.
const SIGNATURE_HEADER: &str = "stripe-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is Arc-wrapped.
#[derive(Clone)]
pub struct AlertsAppState {
    pub webhook_verifier: Arc<StripeWebhookVerifier>,
    pub customer_directory: Arc<dyn CustomerDirectory>,
    pub mail_transport: Arc<dyn MailTransport>,
    pub activity_log: Arc<dyn ActivityLog>,
    pub addressing: MailAddressing,
}

impl AlertsAppState {
    /// Create handlers on demand from the shared state.
    pub fn notifier(&self) -> SendFailureAlertHandler {
        SendFailureAlertHandler::new(
            self.mail_transport.clone(),
            self.activity_log.clone(),
            self.addressing.clone(),
        )
    }

    pub fn webhook_handler(&self) -> HandleStripeWebhookHandler {
        HandleStripeWebhookHandler::new(
            self.webhook_verifier.clone(),
            self.customer_directory.clone(),
            self.activity_log.clone(),
            self.notifier(),
        )
    }

    pub fn test_alert_handler(&self) -> SendTestAlertHandler {
        SendTestAlertHandler::new(self.notifier(), self.activity_log.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Status Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - Service descriptor
pub async fn service_info() -> impl IntoResponse {
    Json(ServiceInfoResponse::current())
}

/// GET /health - Liveness check
pub async fn health(State(state): State<AlertsAppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        logs_count: state.activity_log.len(),
    })
}

/// GET /logs?limit=N - Recent activity, newest first
pub async fn get_logs(
    State(state): State<AlertsAppState>,
    Query(query): Query<LogsQuery>,
) -> impl IntoResponse {
    let log = &state.activity_log;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_READ_LIMIT)
        .min(log.capacity());

    Json(LogsResponse {
        logs: log.recent(limit),
        total: log.len(),
        timestamp: Utc::now(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /test - Send a synthetic alert and report the result
pub async fn send_test_alert(State(state): State<AlertsAppState>) -> impl IntoResponse {
    match state.test_alert_handler().handle().await {
        Ok(result) => (
            StatusCode::OK,
            Json(TestAlertResponse::sent(format!(
                "Test alert sent for {} (message {})",
                result.event_id, result.message_id
            ))),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(TestAlertResponse::failed(e.to_string())),
        ),
    }
}

/// POST /webhook - Handle Stripe webhook events
///
/// The body is taken as raw bytes; the signature covers them exactly.
pub async fn handle_stripe_webhook(
    State(state): State<AlertsAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAckResponse>, WebhookApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = HandleStripeWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    match state.webhook_handler().handle(cmd).await? {
        WebhookOutcome::Ignored { event_type } => {
            tracing::debug!(%event_type, "Webhook acknowledged without alert");
        }
        WebhookOutcome::Notified {
            event_id,
            message_id,
        } => {
            tracing::info!(%event_id, %message_id, "Webhook processed");
        }
        WebhookOutcome::NotificationFailed { event_id, error } => {
            tracing::warn!(%event_id, %error, "Webhook acknowledged but alert not delivered");
        }
    }

    Ok(Json(WebhookAckResponse { received: true }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook rejections to HTTP responses.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        tracing::warn!(error = %self.0, "Webhook rejected");
        (self.0.status_code(), format!("Webhook Error: {}", self.0)).into_response()
    }
}

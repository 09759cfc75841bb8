//! HTTP DTOs (Data Transfer Objects) for the alerting endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::activity::LogEntry;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query string for `GET /logs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogsQuery {
    /// Maximum number of entries to return.
    #[serde(default)]
    pub limit: Option<usize>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub endpoints: EndpointsResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointsResponse {
    pub health: &'static str,
    pub logs: &'static str,
    pub test: &'static str,
    pub webhook: &'static str,
}

impl ServiceInfoResponse {
    pub fn current() -> Self {
        Self {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            status: "running",
            endpoints: EndpointsResponse {
                health: "GET /health",
                logs: "GET /logs?limit=50",
                test: "POST /test",
                webhook: "POST /webhook",
            },
        }
    }
}

/// Response for `GET /health`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub logs_count: usize,
}

/// Response for `GET /logs`.
#[derive(Debug, Clone, Serialize)]
pub struct LogsResponse {
    /// Newest first.
    pub logs: Vec<LogEntry>,
    /// Entries currently held, regardless of `limit`.
    pub total: usize,
    pub timestamp: DateTime<Utc>,
}

/// Response for `POST /test`.
#[derive(Debug, Clone, Serialize)]
pub struct TestAlertResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl TestAlertResponse {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }
}

/// Acknowledgement for an authenticated webhook delivery.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub received: bool,
}

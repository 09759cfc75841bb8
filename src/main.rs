use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use failed_payment_alerts::adapters::http::{alerts_router, AlertsAppState};
use failed_payment_alerts::adapters::{GmailTransport, InMemoryActivityLog, StripeCustomerClient};
use failed_payment_alerts::config::{AppConfig, ServerConfig};
use failed_payment_alerts::domain::payment_failure::{MailAddressing, StripeWebhookVerifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.server);
    config.validate().context("invalid configuration")?;

    if config.stripe.is_live_mode() {
        tracing::info!("Using live Stripe keys");
    }

    let state = AlertsAppState {
        webhook_verifier: Arc::new(
            StripeWebhookVerifier::new(config.stripe.webhook_secret.clone())
                .with_tolerance(config.stripe.webhook_tolerance_secs),
        ),
        customer_directory: Arc::new(
            StripeCustomerClient::new(config.stripe.api_key.clone())
                .with_base_url(config.stripe.api_base_url.clone()),
        ),
        mail_transport: Arc::new(GmailTransport::new(&config.gmail)),
        activity_log: Arc::new(InMemoryActivityLog::new()),
        addressing: MailAddressing {
            from: config.alerts.from_mailbox()?,
            to: config.alerts.to_mailbox()?,
        },
    };

    let app = alerts_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(%addr, environment = ?config.server.environment, "Failed payment alerts listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter. JSON output in production.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

//! Gmail `users.messages.send` transport.
//!
//! Access tokens are exchanged from the refresh token on first use and cached
//! until shortly before they expire.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::GmailConfig;
use crate::ports::{MailError, MailTransport, SentMessage};

/// Tokens are refreshed this long before Google says they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Lifetime assumed when the token response omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    raw: &'a str,
}

struct CachedToken {
    value: SecretString,
    refresh_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.refresh_at
    }
}

/// `MailTransport` that sends through the authorised Gmail account.
pub struct GmailTransport {
    client_id: String,
    client_secret: SecretString,
    refresh_token: SecretString,
    token_url: String,
    api_base_url: String,
    http_client: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl GmailTransport {
    /// Creates a transport from the Gmail section of the configuration.
    pub fn new(config: &GmailConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            refresh_token: config.refresh_token.clone(),
            token_url: config.token_url.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
            token: Mutex::new(None),
        }
    }

    fn send_url(&self) -> String {
        format!("{}/gmail/v1/users/me/messages/send", self.api_base_url)
    }

    /// Returns a cached access token, exchanging the refresh token if needed.
    async fn access_token(&self) -> Result<SecretString, MailError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let fresh = self.exchange_refresh_token().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    async fn exchange_refresh_token(&self) -> Result<CachedToken, MailError> {
        tracing::debug!("Exchanging Gmail refresh token for an access token");

        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret().as_str()),
            ("refresh_token", self.refresh_token.expose_secret().as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| MailError::Authentication(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status, error = %error_text, "OAuth token exchange failed");
            return Err(MailError::Authentication(format!(
                "token endpoint returned {}: {}",
                status, error_text
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| MailError::Authentication(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS));

        Ok(CachedToken {
            value: SecretString::new(token.access_token),
            refresh_at: Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN),
        })
    }
}

#[async_trait]
impl MailTransport for GmailTransport {
    async fn send_raw(&self, raw_message: &str) -> Result<SentMessage, MailError> {
        let token = self.access_token().await?;

        let response = self
            .http_client
            .post(self.send_url())
            .bearer_auth(token.expose_secret())
            .json(&SendRequest { raw: raw_message })
            .send()
            .await
            .map_err(|e| MailError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status, error = %error_text, "Gmail send failed");
            return Err(MailError::Api {
                status,
                message: error_text,
            });
        }

        let sent: SentMessage = response
            .json()
            .await
            .map_err(|e| MailError::InvalidResponse(e.to_string()))?;

        tracing::debug!(message_id = %sent.id, "Gmail accepted message");
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(server: &MockServer) -> GmailTransport {
        GmailTransport::new(&GmailConfig {
            client_id: "client-123".to_string(),
            client_secret: SecretString::new("shh".to_string()),
            refresh_token: SecretString::new("1//refresh".to_string()),
            token_url: format!("{}/token", server.uri()),
            api_base_url: server.uri(),
        })
    }

    async fn mount_token(server: &MockServer, expires_in: u64, times: u64) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=1%2F%2Frefresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.token",
                "expires_in": expires_in,
                "token_type": "Bearer"
            })))
            .expect(times)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn sends_raw_message_with_bearer_token() {
        let server = MockServer::start().await;
        mount_token(&server, 3599, 1).await;
        Mock::given(method("POST"))
            .and(path("/gmail/v1/users/me/messages/send"))
            .and(header("authorization", "Bearer ya29.token"))
            .and(body_json(json!({"raw": "RnJvbTogYQ"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg-1",
                "threadId": "thread-1",
                "labelIds": ["SENT"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sent = transport(&server).send_raw("RnJvbTogYQ").await.unwrap();

        assert_eq!(sent.id, "msg-1");
        assert_eq!(sent.thread_id.as_deref(), Some("thread-1"));
    }

    #[tokio::test]
    async fn reuses_cached_token() {
        let server = MockServer::start().await;
        mount_token(&server, 3599, 1).await;
        Mock::given(method("POST"))
            .and(path("/gmail/v1/users/me/messages/send"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "msg"})))
            .expect(2)
            .mount(&server)
            .await;

        let transport = transport(&server);
        transport.send_raw("a").await.unwrap();
        transport.send_raw("b").await.unwrap();
    }

    #[tokio::test]
    async fn refreshes_token_inside_expiry_margin() {
        let server = MockServer::start().await;
        mount_token(&server, 30, 2).await;
        Mock::given(method("POST"))
            .and(path("/gmail/v1/users/me/messages/send"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "msg"})))
            .expect(2)
            .mount(&server)
            .await;

        let transport = transport(&server);
        transport.send_raw("a").await.unwrap();
        transport.send_raw("b").await.unwrap();
    }

    #[tokio::test]
    async fn token_rejection_is_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant"
            })))
            .mount(&server)
            .await;

        let result = transport(&server).send_raw("a").await;

        match result {
            Err(MailError::Authentication(message)) => assert!(message.contains("invalid_grant")),
            other => panic!("expected authentication error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_rejection_is_api_error() {
        let server = MockServer::start().await;
        mount_token(&server, 3599, 1).await;
        Mock::given(method("POST"))
            .and(path("/gmail/v1/users/me/messages/send"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Insufficient Permission"))
            .mount(&server)
            .await;

        let result = transport(&server).send_raw("a").await;

        assert!(matches!(result, Err(MailError::Api { status: 403, .. })));
    }

    #[test]
    fn send_url_tolerates_trailing_slash() {
        let transport = GmailTransport::new(&GmailConfig {
            client_id: "c".to_string(),
            client_secret: SecretString::new("s".to_string()),
            refresh_token: SecretString::new("r".to_string()),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            api_base_url: "https://gmail.googleapis.com/".to_string(),
        });

        assert_eq!(
            transport.send_url(),
            "https://gmail.googleapis.com/gmail/v1/users/me/messages/send"
        );
    }
}

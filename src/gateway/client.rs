use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::gateway::Action;
use crate::session::SessionHandle;

/// Fallback shown when an error response carries no usable `message`.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Single point of egress to the backend webhook.
///
/// Every domain action is POSTed to one endpoint as an `Action` envelope
/// with the static API key and, when a session exists, a bearer token. The
/// client owns the retry/timeout policy and the centralized 401 reaction;
/// façades above it never duplicate either.
///
/// Retries are not idempotency-checked: a mutating action that hit a 500
/// after the server applied it will be sent again. Callers must treat
/// actions as safe to repeat.
pub struct GatewayClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    timeout_secs: u64,
    retry_attempts: u32,
    retry_delay: Duration,
    session: SessionHandle,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig, session: SessionHandle) -> anyhow::Result<Self> {
        let endpoint = config.endpoint().context("invalid webhook URL")?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
            retry_attempts: config.retry_attempts,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            session,
        })
    }

    /// Send one action envelope and return the parsed response body.
    ///
    /// Status >= 500 is retried up to `retry_attempts` more times with a
    /// fixed delay; 4xx and transport failures are not. A 401 clears the
    /// session before the call rejects.
    pub async fn dispatch(&self, action: &Action) -> Result<Value, GatewayError> {
        let total_attempts = self.retry_attempts as u64 + 1;
        let mut attempt: u64 = 0;

        loop {
            attempt += 1;
            tracing::debug!(action = action.name(), attempt, "dispatching webhook action");

            let mut request = self
                .http
                .post(self.endpoint.clone())
                .header("X-API-Key", &self.api_key)
                .json(action);
            if let Some(token) = self.session.token() {
                request = request.bearer_auth(token);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) if e.is_timeout() => {
                    return Err(GatewayError::Timeout(self.timeout_secs));
                }
                Err(e) => {
                    return Err(GatewayError::Network(e.to_string()));
                }
            };

            let status = response.status();
            if status.is_success() {
                return Self::parse_body(response).await;
            }

            if status == StatusCode::UNAUTHORIZED {
                tracing::warn!(action = action.name(), "backend returned 401, forcing logout");
                self.session.expire();
                return Err(GatewayError::AuthExpired);
            }

            let message = Self::error_message(response).await;

            if status.is_server_error() {
                if attempt < total_attempts {
                    tracing::debug!(
                        status = status.as_u16(),
                        attempt,
                        "server error, retrying after delay"
                    );
                    tokio::time::sleep(self.retry_delay).await;
                    continue;
                }
                return Err(GatewayError::server(status.as_u16(), message));
            }

            return Err(GatewayError::client(status.as_u16(), message));
        }
    }

    /// Dispatch and deserialize the `data` field of the response body.
    pub async fn dispatch_data<T: DeserializeOwned>(&self, action: &Action) -> Result<T, GatewayError> {
        let body = self.dispatch(action).await?;
        let data = body.get("data").cloned().unwrap_or(Value::Null);
        serde_json::from_value(data)
            .map_err(|e| GatewayError::InvalidResponse(format!("unexpected data shape: {}", e)))
    }

    async fn parse_body(response: reqwest::Response) -> Result<Value, GatewayError> {
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    /// Best-effort extraction of the server-provided `message` field.
    async fn error_message(response: reqwest::Response) -> String {
        response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
    }
}

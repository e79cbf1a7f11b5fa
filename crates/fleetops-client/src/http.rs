//! HTTP request wrapper and retrying client.
//!
//! [`ApiClient::perform`] issues exactly one network call and classifies the
//! outcome ([`ApiError`]); the verb entry points (`get`/`post`/`put`/`delete`)
//! all route through one explicit iterative retry loop with linear backoff.
//! The inter-attempt delay is injectable so tests substitute a zero-delay
//! recorder instead of sleeping.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Bounded linear-backoff policy for retryable failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first (total calls = this + 1).
    pub retry_attempts: u32,
    /// Attempt i (0-based) waits `retry_delay * (i + 1)` before retrying.
    pub retry_delay: Duration,
}

impl RetryPolicy {
    /// Single-attempt policy; used by the health gate's probes.
    pub const NONE: RetryPolicy = RetryPolicy {
        retry_attempts: 0,
        retry_delay: Duration::ZERO,
    };

    /// Backoff before the retry following failed attempt `attempt` (0-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay * (attempt + 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        ClientConfig::default().retry_policy()
    }
}

type DelayFn = Arc<dyn Fn(Duration) -> BoxFuture<'static, ()> + Send + Sync>;

/// JSON client over one backend base URL.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    policy: RetryPolicy,
    delay: DelayFn,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("policy", &self.policy)
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_policy(config.base_url.clone(), config.retry_policy())
    }

    pub fn with_policy(base_url: impl Into<String>, policy: RetryPolicy) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            policy,
            delay: Arc::new(|duration| tokio::time::sleep(duration).boxed()),
        }
    }

    /// Replace the inter-attempt delay. Tests install a zero-delay recorder.
    pub fn with_delay_fn(mut self, delay: DelayFn) -> Self {
        self.delay = delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// One network call, classified. No retries.
    ///
    /// Success bodies parse as JSON when possible; a non-empty unparseable
    /// body comes back as a JSON string, an empty body as an empty object.
    pub async fn perform(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = if text.is_empty() {
                format!("HTTP error! status: {}", status.as_u16())
            } else {
                text
            };
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if text.is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    /// The retry loop: explicit iteration, bounded attempts, linear backoff.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let mut attempt: u32 = 0;
        loop {
            match self.perform(method.clone(), path, body.as_ref()).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.policy.retry_attempts => {
                    let wait = self.policy.backoff(attempt);
                    tracing::warn!(
                        path,
                        attempt = attempt + 1,
                        total_attempts = self.policy.retry_attempts + 1,
                        delay = ?wait,
                        error = %err,
                        "request failed, retrying"
                    );
                    (self.delay)(wait).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::debug!(path, error = %err, "request failed");
                    return Err(err);
                }
            }
        }
    }

    fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn encode<B: Serialize>(body: &B) -> Result<Value, ApiError> {
        serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::decode(self.execute(Method::GET, path, None).await?)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = Self::encode(body)?;
        Self::decode(self.execute(Method::POST, path, Some(body)).await?)
    }

    /// POST without a body (action endpoints like `/schedule-daily`).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::decode(self.execute(Method::POST, path, None).await?)
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = Self::encode(body)?;
        Self::decode(self.execute(Method::PUT, path, Some(body)).await?)
    }

    /// PUT without a body (transition endpoints like `/start`, `/close`).
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::decode(self.execute(Method::PUT, path, None).await?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, None).await?;
        Ok(())
    }
}

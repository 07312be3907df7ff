//! HTTP transport
//!
//! Sends authenticated requests to the Hetzner DNS API and retries transient
//! failures with exponential backoff.
//!
//! # Layers
//! - [`SendRequest`] - one attempt, no retry, no interpretation of the status
//! - [`Transport`] - retry loop around a [`SendRequest`], then 401/422 classification
//!
//! Tests replace the [`SendRequest`] and keep the real retry loop.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};

use crate::error::{HetznerError, Result};
use crate::response::{STATUS_UNPROCESSABLE_ENTITY, intercept_error_status};
use crate::traits::SendRequest;
use crate::utils::log_sanitizer::truncate_for_log;

const AUTH_HEADER: &str = "Auth-API-Token";
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// A fully built API request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Human-readable label of the call, e.g. `get zone 12345`.
    pub operation: String,
    pub method: Method,
    pub url: String,
    /// Serialized JSON body.
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(operation: impl Into<String>, method: Method, url: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            method,
            url: url.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// A received HTTP response, status not yet interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    /// `Retry-After` header in seconds, if the server sent one.
    pub retry_after: Option<u64>,
}

// ============ reqwest ============

/// [`SendRequest`] backed by a `reqwest` client.
pub struct ReqwestSender {
    client: Client,
    api_token: String,
}

impl ReqwestSender {
    pub fn new(client: Client, api_token: String) -> Self {
        Self { client, api_token }
    }
}

impl fmt::Debug for ReqwestSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestSender")
            .field("api_token", &"<REDACTED>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SendRequest for ReqwestSender {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        let operation = &request.operation;

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header(AUTH_HEADER, &self.api_token)
            .header(reqwest::header::ACCEPT, JSON_CONTENT_TYPE);
        if let Some(body) = &request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body.clone());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                HetznerError::Configuration {
                    operation: operation.clone(),
                    detail: e.to_string(),
                }
            } else if e.is_timeout() {
                HetznerError::Timeout {
                    operation: operation.clone(),
                    detail: e.to_string(),
                }
            } else {
                HetznerError::NetworkError {
                    operation: operation.clone(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{operation}] Response Status: {status}");

        // Read before the body consumes the response
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let body = response
            .text()
            .await
            .map_err(|e| HetznerError::NetworkError {
                operation: operation.clone(),
                detail: format!("Error reading HTTP response body: {e}"),
            })?;

        Ok(RawResponse {
            status,
            body,
            retry_after,
        })
    }
}

// ============ Retry policy ============

/// When and how long to wait before retrying a request.
///
/// Retried outcomes: network errors, timeouts, HTTP 429, HTTP 5xx except 501,
/// and HTTP 422. The Hetzner API answers 422 for some validation races that go
/// away on their own, so unlike most HTTP clients this one treats it as
/// transient. A 422 that survives every retry is reported as
/// [`HetznerError::UnprocessableEntity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first attempt. `0` disables retrying.
    pub max_retries: u32,
    /// Wait before the first retry, doubled on each further one.
    pub min_wait: Duration,
    /// Upper bound of any single wait.
    pub max_wait: Duration,
}

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 10;
/// Default wait before the first retry.
pub const DEFAULT_RETRY_WAIT_MIN: Duration = Duration::from_secs(1);
/// Default cap of a single wait.
pub const DEFAULT_RETRY_WAIT_MAX: Duration = Duration::from_secs(30);

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            min_wait: DEFAULT_RETRY_WAIT_MIN,
            max_wait: DEFAULT_RETRY_WAIT_MAX,
        }
    }
}

impl RetryPolicy {
    /// A policy that sends every request exactly once.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Whether the outcome of an attempt is worth another one.
    pub fn should_retry(&self, outcome: &Result<RawResponse>) -> bool {
        match outcome {
            Ok(response) => is_retryable_status(response.status),
            Err(e) => e.is_retryable(),
        }
    }

    /// Wait before retry number `attempt` (0-based).
    ///
    /// A server-provided `Retry-After` wins, capped at `max_wait`. Otherwise
    /// `min_wait * 2^attempt`, capped at `max_wait`.
    pub fn delay(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        if let Some(secs) = retry_after {
            return Duration::from_secs(secs).min(self.max_wait);
        }
        let capped_attempt = attempt.min(20); // Prevent 2^attempt from overflowing
        self.min_wait
            .saturating_mul(1_u32 << capped_attempt)
            .min(self.max_wait)
    }
}

fn is_retryable_status(status: u16) -> bool {
    status == 429 || status == STATUS_UNPROCESSABLE_ENTITY || (status >= 500 && status != 501)
}

// ============ Transport ============

/// Retrying transport shared by all resource clients.
#[derive(Clone)]
pub struct Transport {
    sender: Arc<dyn SendRequest>,
    policy: RetryPolicy,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub fn new(sender: Arc<dyn SendRequest>, policy: RetryPolicy) -> Self {
        Self { sender, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Send `request`, retrying transient failures.
    ///
    /// # Returns
    /// * `Ok(response)` - any received response other than 401/422, for the decoder
    /// * `Err(HetznerError::Unauthorized)` - HTTP 401, never retried
    /// * `Err(HetznerError::UnprocessableEntity)` - HTTP 422 after all retries
    /// * `Err(HetznerError::RetriesExhausted)` - network failure, 429 or 5xx on every attempt
    /// * `Err(_)` - any other non-retryable send failure
    pub async fn execute(&self, request: &ApiRequest) -> Result<RawResponse> {
        let operation = &request.operation;
        let max_attempts = self.policy.max_retries.saturating_add(1);
        let mut attempt: u32 = 0;

        let outcome = loop {
            log::debug!(
                "[{operation}] HTTP request to API {} {} (attempt {}/{max_attempts})",
                request.method,
                request.url,
                attempt + 1,
            );

            let outcome = self.sender.send(request).await;
            if !self.policy.should_retry(&outcome) {
                break outcome;
            }
            if attempt >= self.policy.max_retries {
                return match outcome {
                    // A persistent 422 carries a message worth surfacing
                    Ok(response) if response.status == STATUS_UNPROCESSABLE_ENTITY => {
                        intercept_error_status(operation, response)
                    }
                    Ok(response) => Err(exhausted(
                        operation,
                        max_attempts,
                        transient_status(operation, &response),
                    )),
                    Err(e) => Err(exhausted(operation, max_attempts, e)),
                };
            }

            let retry_after = outcome.as_ref().ok().and_then(|r| r.retry_after);
            let delay = self.policy.delay(attempt, retry_after);
            log::warn!(
                "[{operation}] Request failed (attempt {}/{max_attempts}), retrying in {:.1}s: {}",
                attempt + 1,
                delay.as_secs_f32(),
                describe(&outcome),
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        };

        intercept_error_status(operation, outcome?)
    }
}

fn transient_status(operation: &str, response: &RawResponse) -> HetznerError {
    HetznerError::TransientStatus {
        operation: operation.to_string(),
        status: response.status,
        detail: truncate_for_log(&response.body),
    }
}

fn exhausted(operation: &str, attempts: u32, last_error: HetznerError) -> HetznerError {
    HetznerError::RetriesExhausted {
        operation: operation.to_string(),
        attempts,
        last_error: Box::new(last_error),
    }
}

fn describe(outcome: &Result<RawResponse>) -> String {
    match outcome {
        Ok(response) => format!("HTTP {}", response.status),
        Err(e) => e.to_string(),
    }
}

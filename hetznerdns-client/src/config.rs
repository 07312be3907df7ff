//! Client configuration

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{HetznerError, Result};
use crate::http_client::{
    DEFAULT_MAX_RETRIES, DEFAULT_RETRY_WAIT_MAX, DEFAULT_RETRY_WAIT_MIN, RetryPolicy,
};

/// Base URL of the Hetzner DNS API.
pub const DEFAULT_BASE_URL: &str = "https://dns.hetzner.com/api/v1";
/// Default connect timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default request timeout
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings of a [`HetznerDnsClient`](crate::HetznerDnsClient).
///
/// Every field has a default, so an orchestrator can embed this in its own
/// configuration file and only spell out what it changes:
///
/// ```
/// let config: hetznerdns_client::ClientConfig =
///     serde_json::from_str(r#"{"max_retries": 3}"#).unwrap();
/// assert_eq!(config.base_url, "https://dns.hetzner.com/api/v1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API endpoint, without trailing slash.
    pub base_url: String,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Wait before the first retry, in milliseconds.
    pub retry_wait_min_ms: u64,
    /// Cap of a single retry wait, in milliseconds.
    pub retry_wait_max_ms: u64,
    /// TCP/TLS connect timeout, in milliseconds. Must not be zero.
    pub connect_timeout_ms: u64,
    /// Whole-request timeout, in milliseconds. Must not be zero.
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_wait_min_ms: duration_to_millis(DEFAULT_RETRY_WAIT_MIN),
            retry_wait_max_ms: duration_to_millis(DEFAULT_RETRY_WAIT_MAX),
            connect_timeout_ms: duration_to_millis(DEFAULT_CONNECT_TIMEOUT),
            request_timeout_ms: duration_to_millis(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

impl ClientConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            min_wait: Duration::from_millis(self.retry_wait_min_ms),
            max_wait: Duration::from_millis(self.retry_wait_max_ms),
        }
    }

    /// `base_url` with any trailing slashes removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Create the HTTP client with the configured timeouts.
    ///
    /// A zero timeout would fail every request before it is sent, so it is
    /// rejected here.
    pub fn build_http_client(&self) -> Result<Client> {
        let operation = "build http client";
        require_timeout(operation, "connect_timeout_ms", self.connect_timeout_ms)?;
        require_timeout(operation, "request_timeout_ms", self.request_timeout_ms)?;

        Client::builder()
            .connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .timeout(Duration::from_millis(self.request_timeout_ms))
            .build()
            .map_err(|e| HetznerError::Configuration {
                operation: "build http client".to_string(),
                detail: e.to_string(),
            })
    }
}

pub(crate) fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn require_timeout(operation: &str, param: &str, millis: u64) -> Result<()> {
    if millis == 0 {
        return Err(HetznerError::InvalidParameter {
            operation: operation.to_string(),
            param: param.to_string(),
            detail: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

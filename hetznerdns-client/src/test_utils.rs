//! Test helpers: a scripted [`SendRequest`] and client factories.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::client::HetznerDnsClient;
use crate::config::ClientConfig;
use crate::error::{HetznerError, Result};
use crate::http_client::{ApiRequest, RawResponse, RetryPolicy};
use crate::traits::SendRequest;

/// Answers requests from a queue, then from an optional fallback, and records
/// everything it was sent.
pub struct MockSender {
    responses: Mutex<VecDeque<Result<RawResponse>>>,
    fallback: Mutex<Option<RawResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockSender {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    /// Every `send` sleeps for `delay` before answering, to make overlap observable.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub async fn push(&self, outcome: Result<RawResponse>) {
        self.responses.lock().await.push_back(outcome);
    }

    pub async fn push_response(&self, status: u16, body: &str) {
        self.push(Ok(response(status, body))).await;
    }

    pub async fn push_network_error(&self, detail: &str) {
        self.push(Err(HetznerError::NetworkError {
            operation: "mock".to_string(),
            detail: detail.to_string(),
        }))
        .await;
    }

    /// Answer used once the queue is empty.
    pub async fn set_fallback(&self, status: u16, body: &str) {
        *self.fallback.lock().await = Some(response(status, body));
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub async fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().await.last().cloned()
    }

    /// Highest number of `send` calls that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SendRequest for MockSender {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        self.requests.lock().await.push(request.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let scripted = self.responses.lock().await.pop_front();
        let outcome = match scripted {
            Some(outcome) => outcome,
            None => self.fallback.lock().await.clone().ok_or_else(|| {
                HetznerError::Configuration {
                    operation: request.operation.clone(),
                    detail: "no scripted response left".to_string(),
                }
            }),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

pub fn response(status: u16, body: &str) -> RawResponse {
    RawResponse {
        status,
        body: body.to_string(),
        retry_after: None,
    }
}

pub fn ok_response(body: &str) -> RawResponse {
    response(200, body)
}

/// Retry policy without waits.
pub fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        min_wait: Duration::ZERO,
        max_wait: Duration::ZERO,
    }
}

/// Client wired to `sender`, retrying up to three times without waiting.
pub fn mock_client(sender: Arc<MockSender>) -> HetznerDnsClient {
    let config = ClientConfig {
        base_url: "https://dns.example/api/v1".to_string(),
        ..ClientConfig::default()
    };
    HetznerDnsClient::with_sender(sender, &config).with_retry_policy(fast_policy(3))
}

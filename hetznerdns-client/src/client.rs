//! Hetzner DNS API client

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;

use crate::config::{ClientConfig, duration_to_millis};
use crate::error::{HetznerError, Result};
use crate::http_client::{ApiRequest, RawResponse, ReqwestSender, RetryPolicy, Transport};
use crate::mutation::MutationSerializer;
use crate::resources::{PrimaryServerApi, RecordApi, ZoneApi};
use crate::traits::SendRequest;

/// Client for the Hetzner DNS API.
///
/// Holds no state besides the HTTP transport and the lock that serializes
/// create/update requests, so it is cheap to share behind an `Arc`. Two
/// clients never block each other.
#[derive(Debug)]
pub struct HetznerDnsClient {
    transport: Transport,
    mutations: MutationSerializer,
    base_url: String,
}

/// [`HetznerDnsClient`] builder
pub struct HetznerDnsClientBuilder {
    api_token: String,
    config: ClientConfig,
    retry_policy: Option<RetryPolicy>,
}

impl HetznerDnsClientBuilder {
    fn new(api_token: String) -> Self {
        Self {
            api_token,
            config: ClientConfig::default(),
            retry_policy: None,
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Use `policy` instead of the one derived from the configuration.
    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout_ms = duration_to_millis(timeout);
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout_ms = duration_to_millis(timeout);
        self
    }

    pub fn build(self) -> Result<HetznerDnsClient> {
        if self.api_token.trim().is_empty() {
            return Err(HetznerError::InvalidParameter {
                operation: "create client".to_string(),
                param: "api_token".to_string(),
                detail: "must not be empty".to_string(),
            });
        }

        let http = self.config.build_http_client()?;
        let sender = Arc::new(ReqwestSender::new(http, self.api_token));
        let client = HetznerDnsClient::with_sender(sender, &self.config);
        Ok(match self.retry_policy {
            Some(policy) => client.with_retry_policy(policy),
            None => client,
        })
    }
}

impl HetznerDnsClient {
    /// Create a client for `api_token` with the default configuration.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::builder(api_token).build()
    }

    pub fn builder(api_token: impl Into<String>) -> HetznerDnsClientBuilder {
        HetznerDnsClientBuilder::new(api_token.into())
    }

    /// Create a client that sends requests through `sender`.
    ///
    /// Authentication is up to `sender`; only the URL and retry settings of
    /// `config` are used.
    pub fn with_sender(sender: Arc<dyn SendRequest>, config: &ClientConfig) -> Self {
        Self {
            transport: Transport::new(sender, config.retry_policy()),
            mutations: MutationSerializer::new(),
            base_url: config.normalized_base_url().to_string(),
        }
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.transport = self.transport.with_policy(policy);
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        self.transport.policy()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Zone operations.
    pub fn zones(&self) -> ZoneApi<'_> {
        ZoneApi::new(self)
    }

    /// Record operations.
    pub fn records(&self) -> RecordApi<'_> {
        RecordApi::new(self)
    }

    /// Primary server operations.
    pub fn primary_servers(&self) -> PrimaryServerApi<'_> {
        PrimaryServerApi::new(self)
    }

    // ============ Requests ============

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) async fn get(&self, operation: &str, path: &str) -> Result<RawResponse> {
        let request = ApiRequest::new(operation, Method::GET, self.url(path));
        self.transport
            .execute(&request)
            .await
            .inspect_err(HetznerError::log)
    }

    pub(crate) async fn delete(&self, operation: &str, path: &str) -> Result<RawResponse> {
        let request = ApiRequest::new(operation, Method::DELETE, self.url(path));
        self.transport
            .execute(&request)
            .await
            .inspect_err(HetznerError::log)
    }

    pub(crate) async fn post<B: Serialize>(
        &self,
        operation: &str,
        path: &str,
        body: &B,
    ) -> Result<RawResponse> {
        self.mutate(operation, Method::POST, path, body).await
    }

    pub(crate) async fn put<B: Serialize>(
        &self,
        operation: &str,
        path: &str,
        body: &B,
    ) -> Result<RawResponse> {
        self.mutate(operation, Method::PUT, path, body).await
    }

    async fn mutate<B: Serialize>(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<RawResponse> {
        let payload =
            serde_json::to_string(body).map_err(|e| HetznerError::SerializationError {
                operation: operation.to_string(),
                detail: e.to_string(),
            })?;
        let request = ApiRequest::new(operation, method, self.url(path)).with_body(payload);

        self.mutations
            .run(operation, self.transport.execute(&request))
            .await
            .inspect_err(HetznerError::log)
    }
}

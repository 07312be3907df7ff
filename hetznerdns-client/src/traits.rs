use async_trait::async_trait;

use crate::error::Result;
use crate::http_client::{ApiRequest, RawResponse};

/// One attempt at sending a request to the API.
///
/// Implementations return `Ok` for every HTTP response that was actually
/// received, whatever its status, and `Err` only when no response came back
/// (network failure, timeout). Retrying and status classification happen
/// outside this seam, in [`Transport`](crate::http_client::Transport), so a
/// fake implementation only has to script responses.
#[async_trait]
pub trait SendRequest: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse>;
}

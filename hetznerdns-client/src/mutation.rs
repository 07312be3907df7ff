//! Serialization of mutating requests
//!
//! Concurrent create/update requests against the same Hetzner account interfere
//! with each other, so each client lets at most one of them run at a time.

use std::future::Future;

use tokio::sync::Mutex;

/// Lets one mutating request through at a time. One per client instance.
#[derive(Debug, Default)]
pub(crate) struct MutationSerializer {
    lock: Mutex<()>,
}

impl MutationSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `request` while holding the lock, retries included.
    pub async fn run<F>(&self, operation: &str, request: F) -> F::Output
    where
        F: Future,
    {
        let _guard = self.lock.lock().await;
        log::trace!("[{operation}] Mutation lock acquired");
        request.await
    }
}

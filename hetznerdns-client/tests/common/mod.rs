//! Shared test helpers

#![allow(dead_code)]

use std::env;
use std::time::Duration;

use hetznerdns_client::{HetznerDnsClient, RetryPolicy};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-api-token";

/// Skip the test when an environment variable is missing
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: environment variable {} is not set", $var);
                return;
            }
        )+
    };
}

/// Assert that an `Option` is `Some` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

// ============ Mock server ============

/// Retry policy without waits, allowing `max_retries` retries.
pub fn fast_retries(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        min_wait: Duration::ZERO,
        max_wait: Duration::ZERO,
    }
}

/// Client pointed at `server`, retrying twice without waiting.
pub fn client_for(server: &MockServer) -> HetznerDnsClient {
    client_with_retries(server, 2)
}

pub fn client_with_retries(server: &MockServer, max_retries: u32) -> HetznerDnsClient {
    let built = HetznerDnsClient::builder(TEST_TOKEN)
        .base_url(format!("{}/api/v1", server.uri()))
        .retry_policy(fast_retries(max_retries))
        .build();
    match built {
        Ok(client) => client,
        Err(e) => panic!("failed to build test client: {e}"),
    }
}

pub fn zone_json(id: &str, name: &str, ttl: u32) -> serde_json::Value {
    serde_json::json!({ "id": id, "name": name, "ttl": ttl })
}

pub fn record_json(zone_id: &str, id: &str, name: &str, value: &str) -> serde_json::Value {
    serde_json::json!({
        "zone_id": zone_id,
        "id": id,
        "type": "A",
        "name": name,
        "value": value,
        "ttl": 300,
    })
}

// ============ Live API ============

/// Client and zone of the live API tests.
pub struct TestContext {
    pub client: HetznerDnsClient,
    pub zone_name: String,
}

impl TestContext {
    /// Built from `HETZNER_DNS_API_TOKEN` and `TEST_ZONE`.
    pub fn from_env() -> Option<Self> {
        let token = env::var("HETZNER_DNS_API_TOKEN").ok()?;
        let zone_name = env::var("TEST_ZONE").ok()?;
        let client = HetznerDnsClient::new(token).ok()?;
        Some(Self { client, zone_name })
    }
}

/// Unique record name for a test run
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

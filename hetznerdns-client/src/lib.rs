//! # hetznerdns-client
//!
//! A typed client for the [Hetzner DNS API](https://dns.hetzner.com/api-docs),
//! meant to be driven by a reconciliation engine that keeps zones, records and
//! primary servers in sync with a declared configuration.
//!
//! ## Resources
//!
//! | Resource | Accessor | Operations |
//! |----------|----------|------------|
//! | Zones | [`HetznerDnsClient::zones`] | get, get by name, list, create, update, delete |
//! | Records | [`HetznerDnsClient::records`] | get, get by name, list by zone, create, update, delete |
//! | Primary servers | [`HetznerDnsClient::primary_servers`] | get, list by zone, create, update, delete |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* - Use the platform's native TLS implementation.
//! - **`rustls`** - Use rustls. Recommended for cross-compilation and static builds.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hetznerdns_client::{CreateRecordOpts, HetznerDnsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HetznerDnsClient::new(std::env::var("HETZNER_DNS_API_TOKEN")?)?;
//!
//!     // Look up a zone, then add a record to it
//!     let zone = client.zones().get_by_name("example.com").await?;
//!     let record = client
//!         .records()
//!         .create(&CreateRecordOpts {
//!             zone_id: zone.id.clone(),
//!             record_type: "A".to_string(),
//!             name: "www".to_string(),
//!             value: "192.0.2.1".to_string(),
//!             ttl: Some(300),
//!         })
//!         .await?;
//!     println!("created {} in {}", record.id, zone.name);
//!
//!     // A missing resource is not an error
//!     if client.records().get(&record.id).await?.is_none() {
//!         println!("record disappeared");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! [`ClientConfig`] holds the endpoint, retry and timeout settings. It is
//! `serde`-deserializable with defaults for every field, so it can be embedded
//! in a larger configuration file and passed to [`HetznerDnsClientBuilder::config`].
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, HetznerError>`](HetznerError). Every
//! variant carries the label of the failed operation:
//!
//! - [`HetznerError::Unauthorized`] - the API token was rejected (never retried)
//! - [`HetznerError::UnprocessableEntity`] - the API refused the payload
//! - [`HetznerError::RetriesExhausted`] - network errors, 429 or 5xx on every attempt
//! - [`HetznerError::InvalidParameter`] - rejected locally, nothing was sent
//!
//! Network errors, timeouts, HTTP 429, HTTP 5xx (except 501) and HTTP 422 are
//! retried with exponential backoff, see [`RetryPolicy`].
//!
//! ## Concurrency
//!
//! Create and update requests of one client run one at a time; reads and
//! deletes run freely. Share one client (e.g. in an `Arc`) between tasks that
//! should be serialized against each other.

mod client;
mod config;
mod error;
mod http_client;
mod mutation;
mod resources;
mod response;
mod traits;
mod types;
mod utils;

#[cfg(test)]
mod test_utils;

// Re-export client
pub use client::{HetznerDnsClient, HetznerDnsClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL};

// Re-export error types
pub use error::{HetznerError, Result};

// Re-export transport, for custom senders
pub use http_client::{
    ApiRequest, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_WAIT_MAX, DEFAULT_RETRY_WAIT_MIN, RawResponse,
    ReqwestSender, RetryPolicy, Transport,
};
pub use traits::SendRequest;

// Re-export resource clients
pub use resources::{PrimaryServerApi, RecordApi, ZoneApi};

// Re-export types
pub use types::{
    CreatePrimaryServerOpts, CreateRecordOpts, CreateZoneOpts, ErrorMessage, PrimaryServer,
    Record, Zone,
};

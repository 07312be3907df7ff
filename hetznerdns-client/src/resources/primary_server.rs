//! Primary server operations

use crate::client::HetznerDnsClient;
use crate::error::Result;
use crate::response::{decode, decode_optional, expect_ok};
use crate::types::{
    CreatePrimaryServerOpts, PrimaryServer, PrimaryServerEnvelope, PrimaryServersEnvelope,
};

use super::require_id;

/// Primary server operations of a [`HetznerDnsClient`].
///
/// Primary servers only matter for secondary zones, which pull their records
/// from them by zone transfer.
#[derive(Debug, Clone, Copy)]
pub struct PrimaryServerApi<'a> {
    client: &'a HetznerDnsClient,
}

impl<'a> PrimaryServerApi<'a> {
    pub(crate) fn new(client: &'a HetznerDnsClient) -> Self {
        Self { client }
    }

    fn path(id: &str) -> String {
        format!("/primary_servers/{}", urlencoding::encode(id))
    }

    /// Fetch a primary server by id. `Ok(None)` when the API does not know it.
    pub async fn get(&self, id: &str) -> Result<Option<PrimaryServer>> {
        let operation = format!("get primary server {id}");
        require_id(&operation, "id", id)?;

        let response = self.client.get(&operation, &Self::path(id)).await?;
        let envelope: Option<PrimaryServerEnvelope> = decode_optional(&operation, &response)?;
        Ok(envelope.map(|e| e.primary_server))
    }

    /// Primary servers of a zone.
    pub async fn list(&self, zone_id: &str) -> Result<Vec<PrimaryServer>> {
        let operation = format!("list primary servers of zone {zone_id}");
        require_id(&operation, "zone_id", zone_id)?;

        let path = format!("/primary_servers?zone_id={}", urlencoding::encode(zone_id));
        let response = self.client.get(&operation, &path).await?;
        let envelope: Option<PrimaryServersEnvelope> = decode_optional(&operation, &response)?;
        Ok(envelope.map(|e| e.primary_servers).unwrap_or_default())
    }

    pub async fn create(&self, opts: &CreatePrimaryServerOpts) -> Result<PrimaryServer> {
        let operation = format!("create primary server in zone {}", opts.zone_id);
        require_id(&operation, "zone_id", &opts.zone_id)?;

        let response = self.client.post(&operation, "/primary_servers", opts).await?;
        let envelope: PrimaryServerEnvelope = decode(&operation, &response)?;
        log::info!(
            "[{operation}] Created primary server {}",
            envelope.primary_server.id
        );
        Ok(envelope.primary_server)
    }

    /// Replace a primary server with `server`, sent in full.
    pub async fn update(&self, server: &PrimaryServer) -> Result<PrimaryServer> {
        let operation = format!("update primary server {}", server.id);
        require_id(&operation, "id", &server.id)?;
        require_id(&operation, "zone_id", &server.zone_id)?;

        let response = self
            .client
            .put(&operation, &Self::path(&server.id), server)
            .await?;
        let envelope: PrimaryServerEnvelope = decode(&operation, &response)?;
        Ok(envelope.primary_server)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let operation = format!("delete primary server {id}");
        require_id(&operation, "id", id)?;

        let response = self.client.delete(&operation, &Self::path(id)).await?;
        expect_ok(&operation, &response)?;
        log::info!("[{operation}] Deleted");
        Ok(())
    }
}

//! Zone operations

use crate::client::HetznerDnsClient;
use crate::error::{HetznerError, Result};
use crate::response::{decode, decode_optional, expect_ok};
use crate::types::{CreateZoneOpts, Zone, ZoneEnvelope, ZonesEnvelope};

use super::{Matching, require_id, select_by_name};

/// Zone operations of a [`HetznerDnsClient`].
#[derive(Debug, Clone, Copy)]
pub struct ZoneApi<'a> {
    client: &'a HetznerDnsClient,
}

impl<'a> ZoneApi<'a> {
    pub(crate) fn new(client: &'a HetznerDnsClient) -> Self {
        Self { client }
    }

    /// Fetch a zone by id. `Ok(None)` when the API does not know it.
    pub async fn get(&self, id: &str) -> Result<Option<Zone>> {
        let operation = format!("get zone {id}");
        require_id(&operation, "id", id)?;

        let response = self
            .client
            .get(&operation, &format!("/zones/{}", urlencoding::encode(id)))
            .await?;
        let envelope: Option<ZoneEnvelope> = decode_optional(&operation, &response)?;
        Ok(envelope.map(|e| e.zone))
    }

    /// Fetch the zone named exactly `name`.
    ///
    /// The API filters by name on its side but may still return near matches,
    /// so the listing is compared locally. Zone names are unique per account,
    /// several exact matches are reported as [`HetznerError::AmbiguousName`].
    pub async fn get_by_name(&self, name: &str) -> Result<Zone> {
        let operation = format!("get zone by name '{name}'");

        let response = self
            .client
            .get(&operation, &format!("/zones?name={}", urlencoding::encode(name)))
            .await?;
        let envelope: Option<ZonesEnvelope> = decode_optional(&operation, &response)?;
        let zones = envelope.map(|e| e.zones).unwrap_or_default();
        log::debug!("[{operation}] {} zone(s) listed", zones.len());

        select_by_name(&operation, name, zones, |z| z.name.as_str(), Matching::Unique)
    }

    /// List the zones of the account (first page, provider default size).
    pub async fn list(&self) -> Result<Vec<Zone>> {
        let operation = "list zones";

        let response = self.client.get(operation, "/zones").await?;
        let envelope: Option<ZonesEnvelope> = decode_optional(operation, &response)?;
        Ok(envelope.map(|e| e.zones).unwrap_or_default())
    }

    /// Create a zone. The name is checked locally before anything is sent.
    pub async fn create(&self, opts: &CreateZoneOpts) -> Result<Zone> {
        let operation = "create zone";
        validate_zone_name(operation, &opts.name)?;

        let response = self.client.post(operation, "/zones", opts).await?;
        let envelope: ZoneEnvelope = decode(operation, &response)?;
        log::info!(
            "[{operation}] Created zone '{}' ({})",
            envelope.zone.name,
            envelope.zone.id
        );
        Ok(envelope.zone)
    }

    /// Replace a zone with `zone`, sent in full.
    pub async fn update(&self, zone: &Zone) -> Result<Zone> {
        let operation = format!("update zone {}", zone.id);
        require_id(&operation, "id", &zone.id)?;

        let path = format!("/zones/{}", urlencoding::encode(&zone.id));
        let response = self.client.put(&operation, &path, zone).await?;
        let envelope: ZoneEnvelope = decode(&operation, &response)?;
        Ok(envelope.zone)
    }

    /// Delete a zone and every record in it.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let operation = format!("delete zone {id}");
        require_id(&operation, "id", id)?;

        let response = self
            .client
            .delete(&operation, &format!("/zones/{}", urlencoding::encode(id)))
            .await?;
        expect_ok(&operation, &response)?;
        log::info!("[{operation}] Deleted");
        Ok(())
    }
}

/// A zone name needs at least a domain and a TLD label, none of them empty.
pub(crate) fn validate_zone_name(operation: &str, name: &str) -> Result<()> {
    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.trim().is_empty()) {
        return Err(HetznerError::InvalidParameter {
            operation: operation.to_string(),
            param: "name".to_string(),
            detail: format!("'{name}' is not a valid domain, expected <domain>.<tld>"),
        });
    }
    Ok(())
}

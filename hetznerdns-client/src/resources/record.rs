//! Record operations

use crate::client::HetznerDnsClient;
use crate::error::Result;
use crate::response::{decode, decode_optional, expect_ok};
use crate::types::{CreateRecordOpts, Record, RecordEnvelope, RecordsEnvelope};

use super::{Matching, require_id, select_by_name};

/// Record operations of a [`HetznerDnsClient`].
#[derive(Debug, Clone, Copy)]
pub struct RecordApi<'a> {
    client: &'a HetznerDnsClient,
}

impl<'a> RecordApi<'a> {
    pub(crate) fn new(client: &'a HetznerDnsClient) -> Self {
        Self { client }
    }

    /// Fetch a record by id. `Ok(None)` when the API does not know it.
    pub async fn get(&self, id: &str) -> Result<Option<Record>> {
        let operation = format!("get record {id}");
        require_id(&operation, "id", id)?;

        let response = self
            .client
            .get(&operation, &format!("/records/{}", urlencoding::encode(id)))
            .await?;
        let envelope: Option<RecordEnvelope> = decode_optional(&operation, &response)?;
        Ok(envelope.map(|e| e.record))
    }

    /// All records of a zone. A zone the API does not know has no records.
    pub async fn list(&self, zone_id: &str) -> Result<Vec<Record>> {
        let operation = format!("list records of zone {zone_id}");
        self.list_as(&operation, zone_id).await
    }

    /// Fetch the record named exactly `name` in a zone.
    ///
    /// Several records may share a name (round-robin `A` records, multiple
    /// `TXT` values); the first one listed is returned.
    pub async fn get_by_name(&self, zone_id: &str, name: &str) -> Result<Record> {
        let operation = format!("get record '{name}' in zone {zone_id}");

        let records = self.list_as(&operation, zone_id).await?;
        log::debug!("[{operation}] {} record(s) listed", records.len());

        select_by_name(&operation, name, records, |r| r.name.as_str(), Matching::First)
    }

    async fn list_as(&self, operation: &str, zone_id: &str) -> Result<Vec<Record>> {
        require_id(operation, "zone_id", zone_id)?;

        let path = format!("/records?zone_id={}", urlencoding::encode(zone_id));
        let response = self.client.get(operation, &path).await?;
        let envelope: Option<RecordsEnvelope> = decode_optional(operation, &response)?;
        Ok(envelope.map(|e| e.records).unwrap_or_default())
    }

    /// Create a record.
    pub async fn create(&self, opts: &CreateRecordOpts) -> Result<Record> {
        let operation = format!("create record '{}' in zone {}", opts.name, opts.zone_id);
        require_id(&operation, "zone_id", &opts.zone_id)?;

        let response = self.client.post(&operation, "/records", opts).await?;
        let envelope: RecordEnvelope = decode(&operation, &response)?;
        log::info!("[{operation}] Created record {}", envelope.record.id);
        Ok(envelope.record)
    }

    /// Replace a record with `record`, sent in full.
    pub async fn update(&self, record: &Record) -> Result<Record> {
        let operation = format!("update record {}", record.id);
        require_id(&operation, "id", &record.id)?;
        require_id(&operation, "zone_id", &record.zone_id)?;

        let path = format!("/records/{}", urlencoding::encode(&record.id));
        let response = self.client.put(&operation, &path, record).await?;
        let envelope: RecordEnvelope = decode(&operation, &response)?;
        Ok(envelope.record)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let operation = format!("delete record {id}");
        require_id(&operation, "id", id)?;

        let response = self
            .client
            .delete(&operation, &format!("/records/{}", urlencoding::encode(id)))
            .await?;
        expect_ok(&operation, &response)?;
        log::info!("[{operation}] Deleted");
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

// ============ Zone ============

/// A DNS zone hosted by Hetzner DNS.
///
/// `id` is assigned by the provider and stays empty until the zone is created.
/// Updates send the whole value, so every field here is part of the `PUT` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// Domain name, e.g. `example.com`.
    pub name: String,
    /// Default TTL in seconds for records without their own.
    pub ttl: u32,
}

/// Parameters of a new zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateZoneOpts {
    /// Domain name, must look like `<domain>.<tld>`.
    pub name: String,
    /// Default TTL in seconds.
    pub ttl: u32,
}

// ============ Record ============

/// A DNS record inside a zone.
///
/// `zone_id` cannot change after creation; moving a record means deleting and
/// recreating it. A `ttl` of `None` inherits the zone default and is omitted on
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Owning zone.
    pub zone_id: String,
    /// Provider-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// Record type such as `A`, `AAAA`, `CNAME`, `TXT`.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Name relative to the zone, `@` for the apex.
    pub name: String,
    /// Record data.
    pub value: String,
    /// Record TTL in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Parameters of a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRecordOpts {
    /// Owning zone.
    pub zone_id: String,
    /// Record type such as `A`, `AAAA`, `CNAME`, `TXT`.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Name relative to the zone.
    pub name: String,
    /// Record data.
    pub value: String,
    /// Record TTL in seconds; `None` inherits the zone default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

// ============ Primary Server ============

/// An external primary server that a secondary zone transfers from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryServer {
    /// Provider-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// Port of the primary server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Owning zone, immutable after creation.
    pub zone_id: String,
    /// IPv4 or IPv6 address of the primary server.
    pub address: String,
}

/// Parameters of a new primary server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePrimaryServerOpts {
    /// Owning zone.
    pub zone_id: String,
    /// IPv4 or IPv6 address.
    pub address: String,
    /// Port, usually 53.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

// ============ Errors ============

/// Message of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// Body of an HTTP 422 response.
#[derive(Debug, Deserialize)]
pub(crate) struct UnprocessableEntityBody {
    pub error: ErrorMessage,
}

// ============ Envelopes ============

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ZoneEnvelope {
    pub zone: Zone,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ZonesEnvelope {
    #[serde(default)]
    pub zones: Vec<Zone>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RecordEnvelope {
    pub record: Record,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RecordsEnvelope {
    #[serde(default)]
    pub records: Vec<Record>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PrimaryServerEnvelope {
    pub primary_server: PrimaryServer,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PrimaryServersEnvelope {
    #[serde(default)]
    pub primary_servers: Vec<PrimaryServer>,
}

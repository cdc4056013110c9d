//! DNS provider implementations.

mod digitalocean;

#[cfg(test)]
mod tests;

pub use digitalocean::DigitalOceanClient;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Record type handled by the reconciler.
pub const ADDRESS_RECORD_TYPE: &str = "A";

/// One entry of a hosted DNS zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Provider-assigned identifier.
    pub id: u64,
    /// Record type ("A", "TXT", ...).
    #[serde(rename = "type")]
    pub record_type: String,
    /// Subdomain label, "@" for the apex.
    pub name: String,
    /// Record value; an IP address for address records.
    pub data: String,
    /// Time to live in seconds.
    pub ttl: u32,
}

impl DnsRecord {
    /// Whether this is an IPv4 address ("A") record.
    pub fn is_address(&self) -> bool {
        self.record_type == ADDRESS_RECORD_TYPE
    }
}

/// Trait for hosted DNS APIs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List every record of `domain`, regardless of type.
    async fn get_records(&self, domain: &str) -> Result<Vec<DnsRecord>>;

    /// Replace the record identified by `record.id` with `record`.
    async fn update_record(&self, domain: &str, record: &DnsRecord) -> Result<()>;
}

//! DigitalOcean domains API client.

use super::{DnsProvider, DnsRecord};
use crate::config::DEFAULT_API_BASE;
use crate::error::{DdnsError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;

/// DigitalOcean DNS record client.
pub struct DigitalOceanClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    domain_records: Vec<DnsRecord>,
}

/// Error body returned by the API on failure.
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

impl DigitalOceanClient {
    /// Create a new client against the public API.
    pub fn new(client: reqwest::Client, token: String) -> Self {
        Self::with_base_url(client, token, DEFAULT_API_BASE.to_string())
    }

    /// Create with custom base URL (for testing).
    pub fn with_base_url(client: reqwest::Client, token: String, base_url: String) -> Self {
        Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn records_url(&self, domain: &str) -> String {
        format!("{}/{}/records", self.base_url, domain)
    }
}

/// Turn a failed response into an `HttpStatus` error, keeping the API's message if any.
fn status_error(status: StatusCode, body: &str) -> DdnsError {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|e| e.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string()
        });

    DdnsError::HttpStatus {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl DnsProvider for DigitalOceanClient {
    async fn get_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        let response = self
            .client
            .get(self.records_url(domain))
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let listing: RecordsResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            domain = %domain,
            count = listing.domain_records.len(),
            "listed records"
        );
        Ok(listing.domain_records)
    }

    async fn update_record(&self, domain: &str, record: &DnsRecord) -> Result<()> {
        let url = format!("{}/{}", self.records_url(domain), record.id);

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        Ok(())
    }
}

//! Public IP detection.

use crate::error::{DdnsError, Result};
use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Source of the caller's current public IPv4 address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicIpSource: Send + Sync {
    /// Resolve the public IP as a dotted-decimal string.
    async fn public_ip(&self) -> Result<String>;
}

/// IP detector backed by a plain-text echo service.
pub struct IpDetector {
    client: reqwest::Client,
    service: String,
}

impl IpDetector {
    /// Create a detector that queries `service`.
    pub fn new(client: reqwest::Client, service: impl Into<String>) -> Self {
        Self {
            client,
            service: service.into(),
        }
    }
}

#[async_trait]
impl PublicIpSource for IpDetector {
    async fn public_ip(&self) -> Result<String> {
        let response = self.client.get(&self.service).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DdnsError::HttpStatus {
                status: status.as_u16(),
                message: format!("from {}", self.service),
            });
        }

        // Some echo services end the address with a newline.
        let text = response.text().await?;
        let ip = text.trim();
        if ip.parse::<Ipv4Addr>().is_err() {
            return Err(DdnsError::InvalidIp(ip.to_string()));
        }
        let ip = ip.to_string();

        tracing::debug!(service = %self.service, ip = %ip, "resolved public ip");
        Ok(ip)
    }
}

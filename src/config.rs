//! Configuration management for do-ddns.
//!
//! Values come from an optional TOML file, then `DO_TOKEN` and `DOMAIN`
//! from the environment override whatever the file said.

use crate::error::{DdnsError, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the DigitalOcean API token.
pub const TOKEN_ENV: &str = "DO_TOKEN";

/// Environment variable holding the domain to reconcile.
pub const DOMAIN_ENV: &str = "DOMAIN";

/// Default IP echo service.
pub const DEFAULT_IP_SERVICE: &str = "https://api.ipify.org";

/// Default DigitalOcean domains endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.digitalocean.com/v2/domains";

/// Main configuration structure.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Domain whose records are reconciled (e.g. "example.com").
    #[serde(default)]
    pub domain: String,

    /// API token (or environment variable name if prefixed with $).
    #[serde(default)]
    pub token: String,

    /// Polling interval in seconds (default: 60).
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Service that echoes the caller's public IP as plain text.
    #[serde(default = "default_ip_service")]
    pub ip_service: String,

    /// Base URL of the domains API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Timeout applied to every outbound request, in seconds.
    #[serde(default = "default_timeout")]
    pub http_timeout_secs: u64,
}

fn default_interval() -> u64 {
    60
}

fn default_ip_service() -> String {
    DEFAULT_IP_SERVICE.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            token: String::new(),
            interval_secs: default_interval(),
            ip_service: default_ip_service(),
            api_base: default_api_base(),
            http_timeout_secs: default_timeout(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("Config")
            .field("domain", &self.domain)
            .field("token", &token)
            .field("interval_secs", &self.interval_secs)
            .field("ip_service", &self.ip_service)
            .field("api_base", &self.api_base)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DdnsError::Config("Could not find config directory".to_string()))?;

        Ok(config_dir.join("do-ddns").join("config.toml"))
    }

    /// Load configuration from `path` and apply the process environment on top.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Self::load_from(path)?;
        Ok(config.with_env(|name| std::env::var(name).ok()))
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment overrides and resolve `$VAR` references.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV) {
            self.token = token;
        }
        if let Some(domain) = lookup(DOMAIN_ENV) {
            self.domain = domain;
        }

        self.token = resolve_env(&self.token, &lookup);
        self.domain = resolve_env(&self.domain, &lookup);
        self
    }

    /// Names of the settings that are still empty.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.domain.is_empty() {
            missing.push(DOMAIN_ENV);
        }
        if self.token.is_empty() {
            missing.push(TOKEN_ENV);
        }
        missing
    }

    /// Polling interval as a duration.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Build the HTTP client shared by the IP detector and the DNS provider.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        if self.http_timeout_secs == 0 {
            return Err(DdnsError::Config(
                "http_timeout_secs must be at least one second".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.http_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }
}

/// Resolve environment variable references (values starting with $).
fn resolve_env<F>(value: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(var_name) = value.strip_prefix('$') {
        lookup(var_name).unwrap_or_else(|| {
            tracing::warn!("Environment variable {} not set", var_name);
            value.to_string()
        })
    } else {
        value.to_string()
    }
}

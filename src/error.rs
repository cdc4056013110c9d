//! Error types for do-ddns.

use thiserror::Error;

/// Result type alias for do-ddns.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// DDNS error types.
#[derive(Error, Debug)]
pub enum DdnsError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection or transport failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Unexpected HTTP status from the IP service or the DNS API.
    #[error("Unexpected HTTP status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Malformed JSON in a response body.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The IP service answered with something that is not an IPv4 address.
    #[error("Invalid IP response: {0:?}")]
    InvalidIp(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for DdnsError {
    fn from(e: reqwest::Error) -> Self {
        DdnsError::Network(e.to_string())
    }
}

impl From<toml::de::Error> for DdnsError {
    fn from(e: toml::de::Error) -> Self {
        DdnsError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for DdnsError {
    fn from(e: serde_json::Error) -> Self {
        DdnsError::Decode(e.to_string())
    }
}

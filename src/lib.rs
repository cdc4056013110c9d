//! # do-ddns
//!
//! A dynamic DNS updater for domains hosted on DigitalOcean.
//!
//! Every interval it looks up the caller's public IPv4 address and patches
//! each "A" record of the configured domain that points somewhere else.
//! Other record types are left alone, and nothing is persisted between passes.
//!
//! ## Usage
//!
//! ```bash
//! export DO_TOKEN=dop_v1_...
//! export DOMAIN=example.com
//!
//! # Reconcile now and every minute until Ctrl+C
//! do-ddns
//!
//! # Single pass, exit code 1 if it could not run
//! do-ddns once
//!
//! # Show the public IP and the current A records
//! do-ddns status
//! ```

pub mod config;
pub mod detector;
pub mod error;
pub mod providers;
pub mod reconcile;

pub use config::Config;
pub use detector::{IpDetector, PublicIpSource};
pub use error::{DdnsError, Result};
pub use providers::{DigitalOceanClient, DnsProvider, DnsRecord};
pub use reconcile::{PassReport, Reconciler};

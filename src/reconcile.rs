//! Reconciliation of address records against the current public IP.
//!
//! A pass resolves the public IP, lists the domain's records and pushes the
//! new address to every "A" record that does not already carry it. Errors
//! are logged where they occur. An IP or listing failure aborts the pass;
//! a failed record update only affects that record.

use crate::detector::PublicIpSource;
use crate::error::Result;
use crate::providers::DnsProvider;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Outcome of one completed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// IP the records were reconciled against.
    pub ip: String,
    /// Address records that already had the IP.
    pub unchanged: usize,
    /// Address records successfully updated.
    pub updated: usize,
    /// Address records whose update failed.
    pub failed: usize,
    /// Records of other types.
    pub ignored: usize,
}

/// Drives reconciliation passes for a single domain.
pub struct Reconciler {
    ip_source: Box<dyn PublicIpSource>,
    provider: Box<dyn DnsProvider>,
    domain: String,
}

impl Reconciler {
    pub fn new(
        ip_source: Box<dyn PublicIpSource>,
        provider: Box<dyn DnsProvider>,
        domain: String,
    ) -> Self {
        Self {
            ip_source,
            provider,
            domain,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Run one reconciliation pass.
    pub async fn reconcile(&self) -> Result<PassReport> {
        let target_ip = self.ip_source.public_ip().await.map_err(|e| {
            error!(error = %e, "error fetching the public ip");
            e
        })?;

        info!(ip = %target_ip, "fetched public ip");

        let records = self.provider.get_records(&self.domain).await.map_err(|e| {
            error!(domain = %self.domain, error = %e, "error listing records");
            e
        })?;

        let mut report = PassReport {
            ip: target_ip.clone(),
            ..PassReport::default()
        };

        for record in records {
            if !record.is_address() {
                report.ignored += 1;
                continue;
            }

            if record.data == target_ip {
                info!(
                    domain = %self.domain,
                    record = %record.name,
                    ip = %target_ip,
                    "record already has desired ip"
                );
                report.unchanged += 1;
                continue;
            }

            info!(
                domain = %self.domain,
                record = %record.name,
                reported_ip = %record.data,
                target_ip = %target_ip,
                "record does not have desired ip"
            );

            let mut updated = record;
            updated.data = target_ip.clone();

            match self.provider.update_record(&self.domain, &updated).await {
                Ok(()) => {
                    info!(
                        domain = %self.domain,
                        record = %updated.name,
                        ip = %target_ip,
                        "record updated"
                    );
                    report.updated += 1;
                }
                Err(e) => {
                    error!(
                        domain = %self.domain,
                        record = %updated.name,
                        id = updated.id,
                        error = %e,
                        "error updating record"
                    );
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Reconcile immediately, then every `period`, until `shutdown` completes.
    ///
    /// Shutdown is only observed between passes; a pass in flight runs to
    /// completion. Ticks missed during a slow pass are not replayed.
    pub async fn run<F>(&self, period: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown => {
                    info!("Shutdown signal received, stopping...");
                    return;
                }

                _ = ticker.tick() => {
                    match self.reconcile().await {
                        Ok(report) => debug!(?report, "reconciliation pass complete"),
                        Err(e) => debug!(error = %e, "reconciliation pass aborted"),
                    }
                }
            }
        }
    }
}

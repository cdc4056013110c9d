//! do-ddns - keep DigitalOcean A records pointed at the current public IP.

use anyhow::Context;
use clap::{Parser, Subcommand};
use do_ddns::config::Config;
use do_ddns::detector::{IpDetector, PublicIpSource};
use do_ddns::providers::{DigitalOceanClient, DnsProvider};
use do_ddns::reconcile::Reconciler;
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "do-ddns")]
#[command(about = "Dynamic DNS updater for DigitalOcean domains")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile now and then on every interval until stopped (default)
    Run {
        /// Check interval in seconds
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Run a single reconciliation pass and exit
    Once,

    /// Show the public IP and the domain's address records
    Status,
}

fn get_config_path(cli_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_path {
        return path;
    }

    // Default locations
    let candidates = [
        dirs::config_dir().map(|p| p.join("do-ddns/config.toml")),
        Some(PathBuf::from("/etc/do-ddns/config.toml")),
        Some(PathBuf::from("config.toml")),
    ];

    for candidate in candidates.into_iter().flatten() {
        if candidate.exists() {
            return candidate;
        }
    }

    // Return default even if it doesn't exist
    Config::default_path().unwrap_or_else(|_| PathBuf::from("config.toml"))
}

fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config_path = get_config_path(cli.config);
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    for name in config.missing() {
        tracing::warn!("{} is not set; provider requests will likely fail", name);
    }

    match cli.command.unwrap_or(Commands::Run { interval: None }) {
        Commands::Run { interval } => {
            let period = interval
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.interval());
            cmd_run(&config, period).await?;
        }
        Commands::Once => cmd_once(&config).await?,
        Commands::Status => cmd_status(&config).await?,
    }

    Ok(())
}

fn build_reconciler(config: &Config) -> anyhow::Result<Reconciler> {
    let client = config.http_client()?;
    let detector = IpDetector::new(client.clone(), config.ip_service.clone());
    let provider = DigitalOceanClient::with_base_url(
        client,
        config.token.clone(),
        config.api_base.clone(),
    );

    Ok(Reconciler::new(
        Box::new(detector),
        Box::new(provider),
        config.domain.clone(),
    ))
}

async fn cmd_run(config: &Config, period: Duration) -> anyhow::Result<()> {
    anyhow::ensure!(!period.is_zero(), "interval must be at least one second");

    let reconciler = build_reconciler(config)?;

    tracing::info!(
        domain = %reconciler.domain(),
        interval_secs = period.as_secs(),
        "starting ddns"
    );

    reconciler.run(period, shutdown_signal()).await;
    Ok(())
}

async fn cmd_once(config: &Config) -> anyhow::Result<()> {
    let reconciler = build_reconciler(config)?;
    let report = reconciler.reconcile().await?;

    tracing::info!(
        ip = %report.ip,
        updated = report.updated,
        unchanged = report.unchanged,
        failed = report.failed,
        "pass complete"
    );
    Ok(())
}

async fn cmd_status(config: &Config) -> anyhow::Result<()> {
    let client = config.http_client()?;
    let detector = IpDetector::new(client.clone(), config.ip_service.clone());
    let provider = DigitalOceanClient::with_base_url(
        client,
        config.token.clone(),
        config.api_base.clone(),
    );

    println!("do-ddns Status");
    println!("==============\n");

    let current_ip = match detector.public_ip().await {
        Ok(ip) => {
            println!("Current Public IP: {}", ip);
            Some(ip)
        }
        Err(e) => {
            println!("Failed to detect IP: {}", e);
            None
        }
    };

    println!("\nA records for {}:", config.domain);
    println!("---------");

    let records = provider.get_records(&config.domain).await?;
    for record in records.iter().filter(|r| r.is_address()) {
        let state = match &current_ip {
            Some(ip) if *ip == record.data => "ok",
            Some(_) => "stale",
            None => "unknown",
        };
        println!(
            "  {} (id {}, ttl {}): {} [{}]",
            record.name, record.id, record.ttl, record.data, state
        );
    }

    Ok(())
}

/// Returns a future that completes on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

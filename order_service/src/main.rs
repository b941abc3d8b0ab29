use std::{path::PathBuf, str::FromStr};

use anyhow::Context;
use clap::Parser;
use order_service::config::ServiceConfig;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "order-service")]
#[command(about = "Custodial HTTP API for the on-chain order book")]
struct Cli {
    /// Listen port, overrides ORDER_SERVICE_PORT
    #[arg(short, long)]
    port: Option<u16>,
    /// Deployment config file (TOML or JSON)
    #[arg(long)]
    deploy_config: Option<PathBuf>,
    /// Network profile to connect with
    #[arg(short, long)]
    network: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ServiceConfig::from_env()
        .context("Failed to load config, please ensure all env vars are defined.")?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(path) = cli.deploy_config {
        config.deploy_config = path;
    }
    if let Some(network) = cli.network {
        config.network = network;
    }

    let level = tracing::Level::from_str(&config.log_level)
        .with_context(|| format!("Invalid log level {}", config.log_level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(false)
        .init();

    order_service::bootstrap(config).await
}

//! Medical Waste Monitor - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_logging(&config).context("initializing logging")?;

    info!("=== Waste Monitor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(?config, "Starting waste monitoring service...");

    run_server(config).await
}

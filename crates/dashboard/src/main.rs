//! Health Risk Dashboard - Main Entry Point

use anyhow::Context;
use dashboard::{init_logging, run_server, DashboardConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::var("DASHBOARD_CONFIG").ok();
    let config = DashboardConfig::load(path.as_deref()).context("Failed to load configuration")?;
    init_logging(&config).context("Failed to set tracing subscriber")?;

    info!("=== Health Risk Dashboard v{} ===", env!("CARGO_PKG_VERSION"));
    match path {
        Some(path) => info!("Loaded configuration from {}", path),
        None => info!("Using default configuration"),
    }

    run_server(&config).await
}

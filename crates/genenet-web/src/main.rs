//! Gene network analysis server
//!
//! Run with: cargo run -p genenet-web --bin genenet-server

use std::net::SocketAddr;

use anyhow::Context;
use genenet_network::Datasets;
use genenet_web::{config::Config, router::build_router, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting gene network server...");

    let config = Config::load().context("Failed to load configuration")?;

    // Reference files can be large spreadsheets; parse them off the async runtime
    let sources = config.data.clone();
    let datasets = tokio::task::spawn_blocking(move || Datasets::load(&sources))
        .await
        .context("Dataset loading task panicked")?;
    let status = datasets.status();
    info!(
        links_rows = status.links_file_rows,
        biogrid_rows = status.biogrid_file_rows,
        ready = status.is_ready(),
        "Datasets loaded"
    );

    let app = build_router(AppState::new(datasets, config.analysis.clone()), &config.server);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.server.bind))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

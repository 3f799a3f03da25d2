//! evently record-service emulator entry point.
//!
//! Starts the Axum HTTP server that stands in for the hosted user-record
//! database during development and tests.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use evently::api;
use evently::app_state::AppState;
use evently::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("loading configuration")?;
    tracing::info!(addr = %config.listen_addr, "starting evently record service");

    let app = api::app(AppState::new());

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

//! AgriOne - farmer dashboard backend
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use agrione_infra::{config, init_tracing};
use agrione_server::{app_router, AppContext};
use tokio::net::TcpListener;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading config so credentials land in the environment
    let dotenv = dotenvy::dotenv();

    let config = config::load()?;
    init_tracing(&config.logging);

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env file loaded"),
    }

    let addr = config.bind_addr()?;
    let context = Arc::new(AppContext::new(config)?);
    let mode = context.mode();

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, %mode, "AgriOne server listening");

    axum::serve(listener, app_router(context)).with_graceful_shutdown(shutdown_signal()).await?;

    info!("AgriOne server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

use super::http_api::{build_router, SharedState};
use crate::shared::Result;
use anyhow::Context;
use std::net::SocketAddr;
use tracing::{info, warn};

/// Default listen address for `serve`
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Serves the HTTP API until Ctrl+C is received
pub async fn start_server(addr: SocketAddr, state: SharedState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    info!(%local_addr, "dashboard API listening");
    eprintln!("🚀 branch-pulse API running at http://{}", local_addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    eprintln!("Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    eprintln!("\nShutting down...");
}

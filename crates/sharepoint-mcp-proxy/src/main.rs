//! Read-only SharePoint proxy backed by Microsoft Graph.
//!
//! This proxy:
//! - Authenticates to Azure AD with the client-credentials grant
//! - Caches the access token in memory, refreshing it 5 minutes before expiry
//! - Serves site search and item listing as REST routes (OpenAPI 3.0.3)
//! - Serves the same operations as MCP tools over Streamable HTTP

use std::sync::Arc;

use clap::Parser;
use sharepoint_graph::{ClientCredentialsAcquirer, GraphClient, TokenCache};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod handlers;
mod mcp;
mod openapi;

#[cfg(test)]
mod testing;

use config::Config;
use handlers::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let credentials = config.credentials().map_err(|e| {
        error!("{}", e);
        e
    })?;

    info!("Starting sharepoint-mcp-proxy v{}", env!("CARGO_PKG_VERSION"));
    info!("  Host: {}", config.host);
    info!("  Port: {}", config.port);
    info!("  Surface: {}", config.surface);
    info!("  Graph: {}", config.graph_base_url);
    info!("  Tenant: {}", credentials.tenant_id);
    info!("  Graph timeout: {}s", config.graph_timeout_secs);

    let acquirer = Arc::new(ClientCredentialsAcquirer::new(
        credentials,
        config.authority_host.clone(),
    ));
    let tokens = Arc::new(TokenCache::new(acquirer));
    let graph =
        GraphClient::new(&config.graph_base_url, tokens)?.with_timeout(config.graph_timeout());

    let state = AppState::new(Arc::new(graph), config.surface);
    let app = router(state);

    // Bind and serve
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = ctrl_c => "Ctrl+C",
        _ = terminate => "SIGTERM",
    };
    info!("Received {}, draining connections", received);
}

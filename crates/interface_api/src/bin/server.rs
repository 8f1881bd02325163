//! KYC Registry - API Server Binary
//!
//! This binary starts the HTTP API server for the KYC registry.
//!
//! # Usage
//!
//! ```bash
//! # Run against PostgreSQL
//! KYC_DATABASE_URL=postgres://... cargo run --bin kyc-api
//!
//! # Run with the in-memory store
//! KYC_STORAGE=memory cargo run --bin kyc-api
//! ```
//!
//! # Environment Variables
//!
//! * `KYC_HOST` - Server host (default: 0.0.0.0)
//! * `KYC_PORT` - Server port (default: 8080)
//! * `KYC_DATABASE_URL` - PostgreSQL connection string
//! * `KYC_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `KYC_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `KYC_STORAGE` - `postgres` or `memory` (default: postgres)

use std::net::SocketAddr;

use anyhow::Context;
use interface_api::{
    bootstrap::{build_state, init_tracing},
    config::ApiConfig,
    create_router,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        "Starting KYC Registry API Server"
    );

    let state = build_state(&config).await?;
    let app = create_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("Invalid server address")?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

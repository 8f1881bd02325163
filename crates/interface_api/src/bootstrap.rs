//! Storage wiring shared by the binaries

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_kyc::InMemoryKycStore;
use infra_db::{
    create_pool, run_migrations, DatabaseConfig, PostgresClientRepository,
    PostgresPersonRepository,
};

use crate::config::{ApiConfig, StorageBackend};
use crate::AppState;

/// Builds the application state over the configured storage backend
///
/// For PostgreSQL the pool is created and pending migrations are applied
/// before the state is returned.
pub async fn build_state(config: &ApiConfig) -> anyhow::Result<AppState> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            let store = Arc::new(InMemoryKycStore::new());
            Ok(AppState::new(store.clone(), store))
        }
        StorageBackend::Postgres => {
            info!("Using PostgreSQL storage");
            let db_config =
                DatabaseConfig::new(&config.database_url).max_connections(config.max_connections);
            let pool = create_pool(db_config)
                .await
                .context("Failed to create database pool")?;
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;

            Ok(AppState::new(
                Arc::new(PostgresClientRepository::new(pool.clone())),
                Arc::new(PostgresPersonRepository::new(pool)),
            ))
        }
    }
}

/// Initializes the tracing subscriber
///
/// `RUST_LOG` wins over `log_level`. Output goes to stderr so the MCP server
/// keeps stdout for protocol messages.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

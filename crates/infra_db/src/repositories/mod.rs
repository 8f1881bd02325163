//! PostgreSQL repository adapters
//!
//! Each repository implements one KYC port on top of a shared pool. Queries are
//! built at runtime with `sqlx::query_as` and mapped through row structs
//! deriving `FromRow`; rows are converted to domain entities in this module so
//! SQLx types never leak past the adapter.

pub mod types;
pub mod client;
pub mod person;

pub use client::PostgresClientRepository;
pub use person::PostgresPersonRepository;

use std::time::Instant;

use core_kernel::{current_timestamp, AdapterHealth, HealthCheckResult};
use sqlx::PgPool;

/// Runs `SELECT 1` against the pool and reports the outcome
pub(crate) async fn check_pool(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = Instant::now();
    let result = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let (status, message) = match result {
        Ok(_) => (AdapterHealth::Healthy, None),
        Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
    };

    HealthCheckResult {
        adapter_id: adapter_id.to_string(),
        status,
        latency_ms,
        message,
        checked_at: current_timestamp(),
    }
}

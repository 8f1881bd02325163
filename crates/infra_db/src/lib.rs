//! Infrastructure Database Layer
//!
//! PostgreSQL adapters for the KYC repository ports, built on SQLx.
//!
//! # Architecture
//!
//! - [`pool`]: connection pool configuration and schema migrations
//! - [`error`]: `DatabaseError` and its translation into `PortError`
//! - [`repositories`]: `PostgresClientRepository` and `PostgresPersonRepository`
//!
//! Client types, risk levels and relationship types are stored as PostgreSQL
//! enum types whose labels match the wire names.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::repositories::{PostgresClientRepository, PostgresPersonRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/kyc")).await?;
//! run_migrations(&pool).await?;
//!
//! let clients = Arc::new(PostgresClientRepository::new(pool.clone()));
//! let persons = Arc::new(PostgresPersonRepository::new(pool));
//! ```

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::{PostgresClientRepository, PostgresPersonRepository};

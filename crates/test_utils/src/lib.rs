//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! KYC registry test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built requests and dates used across tests
//! - `builders`: Builder patterns for create requests
//! - `doubles`: Repository test doubles that simulate storage failures
//! - `database`: PostgreSQL test container management
//! - `generators`: Property-based and fake-data generators

pub mod fixtures;
pub mod builders;
pub mod doubles;
pub mod database;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use doubles::*;
pub use database::*;
pub use generators::*;

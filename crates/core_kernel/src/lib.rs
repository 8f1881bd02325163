//! Core Kernel - Foundational types for the KYC registry
//!
//! This crate provides the building blocks shared by every other crate:
//! - Strongly-typed identifiers for clients and persons
//! - Port infrastructure (error type, marker traits, health checks)
//! - Timestamp helpers that keep `updated_at` strictly monotonic

pub mod identifiers;
pub mod ports;
pub mod temporal;

pub use identifiers::{ClientId, PersonId};
pub use ports::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
pub use temporal::{advance_timestamp, current_timestamp};

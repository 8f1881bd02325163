//! Adapters for the KYC repository ports
//!
//! - **InMemoryKycStore**: process-local store implementing both
//!   [`crate::ports::ClientRepository`] and [`crate::ports::PersonRepository`],
//!   used for tests and the `memory` storage backend
//!
//! The PostgreSQL adapters live in `infra_db` so that this crate stays free of
//! database drivers.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_kyc::{InMemoryKycStore, ClientService, PersonService};
//!
//! let store = Arc::new(InMemoryKycStore::new());
//! let clients = ClientService::new(store.clone(), store.clone());
//! let persons = PersonService::new(store.clone(), store);
//! ```

pub mod memory;

pub use memory::InMemoryKycStore;

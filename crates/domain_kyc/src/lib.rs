//! KYC Registry Domain
//!
//! This crate holds the client/beneficial-owner registry used for Know Your
//! Customer compliance: the `Client` and `Person` entities, the request and view
//! shapes exchanged with callers, the repository ports, and the services that
//! orchestrate search, retrieval, and creation.
//!
//! # Layers
//!
//! - **Entities**: [`Client`] and [`Person`] with their enumerations
//! - **Requests / Views**: create-request shapes and read-only projections
//! - **Ports**: [`ClientRepository`] and [`PersonRepository`], implemented by the
//!   in-memory adapter here and by the PostgreSQL adapter in `infra_db`
//! - **Services**: [`ClientService`] and [`PersonService`]
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_kyc::{ClientService, InMemoryKycStore, ClientType, CreateClientRequest};
//!
//! let store = Arc::new(InMemoryKycStore::new());
//! let service = ClientService::new(store.clone(), store);
//!
//! let client = service
//!     .create_client(CreateClientRequest::new("ABC Corp", ClientType::Company))
//!     .await?;
//! let matches = service.search_clients(Some("abc"), None, None).await?;
//! ```

pub mod client;
pub mod person;
pub mod requests;
pub mod views;
pub mod error;
pub mod validation;
pub mod ports;
pub mod adapters;
pub mod services;

pub use client::{Client, NewClient, ClientType, RiskLevel};
pub use person::{Person, NewPerson, ClientRef, RelationshipType};
pub use requests::{CreateClientRequest, CreatePersonRequest};
pub use views::{ClientView, PersonView};
pub use error::KycError;
pub use validation::{RequestValidator, ValidationResult};
pub use ports::{ClientQuery, ClientRepository, PersonRepository};
pub use adapters::InMemoryKycStore;
pub use services::{ClientService, PersonService};

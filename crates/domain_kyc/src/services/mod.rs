//! Application services
//!
//! Services orchestrate validation, repository calls and view conversion.
//! They receive their repositories through the constructor and hold no other
//! state.

pub mod client_service;
pub mod person_service;

pub use client_service::ClientService;
pub use person_service::PersonService;

//! KYC domain errors
//!
//! Validation and not-found failures are distinct variants so callers can
//! branch on them. Storage failures on writes are wrapped uniformly with a
//! generic message; read failures carry the port error as-is.

use core_kernel::{ClientId, PortError};
use thiserror::Error;

/// Errors that can occur in the KYC domain
#[derive(Debug, Error)]
pub enum KycError {
    /// Malformed or out-of-range input, raised before any persistence attempt
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A person was created against a client that does not exist
    #[error("Client not found with ID: {0}")]
    ClientNotFound(ClientId),

    /// A write could not be completed by the storage layer
    #[error("{message}: {source}")]
    Persistence {
        message: String,
        #[source]
        source: PortError,
    },

    /// A read could not be completed by the storage layer
    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

impl KycError {
    /// Creates a Validation error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        KycError::Validation(message.into())
    }

    /// Creates a Validation error from a list of messages
    pub fn validation_failed(errors: Vec<String>) -> Self {
        KycError::Validation(errors.join("; "))
    }

    /// Wraps a storage failure raised while writing
    pub fn persistence(message: impl Into<String>, source: PortError) -> Self {
        KycError::Persistence {
            message: message.into(),
            source,
        }
    }

    /// Returns true for input validation failures
    pub fn is_validation(&self) -> bool {
        matches!(self, KycError::Validation(_))
    }

    /// Returns true when a referenced entity is missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, KycError::ClientNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_persistence_keeps_cause() {
        let error = KycError::persistence(
            "Failed to create client",
            PortError::connection("pool timed out"),
        );
        assert!(error.to_string().starts_with("Failed to create client: "));
        assert!(error.to_string().contains("pool timed out"));
        assert!(error.source().is_some());
        assert!(!error.is_validation());
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_validation_failed_joins_messages() {
        let error = KycError::validation_failed(vec!["a".into(), "b".into()]);
        assert_eq!(error.to_string(), "Validation failed: a; b");
        assert!(error.is_validation());
    }

    #[test]
    fn test_client_not_found() {
        let id = ClientId::new();
        let error = KycError::ClientNotFound(id);
        assert!(error.is_not_found());
        assert!(error.to_string().contains(&id.to_string()));
    }
}

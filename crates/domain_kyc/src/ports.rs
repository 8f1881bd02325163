//! KYC Repository Ports
//!
//! Persistence-agnostic contracts for reading and writing clients and persons.
//! Services depend on these traits only; the in-memory store in
//! [`crate::adapters`] and the PostgreSQL repositories in `infra_db` implement
//! them.
//!
//! # Absent vs. failed
//!
//! A lookup that finds nothing returns `Ok(None)` or an empty `Vec`. A storage
//! failure returns `Err(PortError)`. Callers must not conflate the two.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_kyc::ports::{ClientQuery, ClientRepository};
//!
//! pub struct ReviewQueue {
//!     clients: Arc<dyn ClientRepository>,
//! }
//!
//! impl ReviewQueue {
//!     pub async fn pending(&self) -> Result<Vec<Client>, PortError> {
//!         self.clients.search(&ClientQuery::by_risk_level(RiskLevel::High)).await
//!     }
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{ClientId, DomainPort, HealthCheckable, PersonId, PortError};

use crate::client::{Client, ClientType, NewClient, RiskLevel};
use crate::person::{NewPerson, Person, RelationshipType};

/// Multi-criteria client search
///
/// Each criterion that is `Some` filters the result; criteria combine with AND.
/// A query with every criterion `None` matches every client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientQuery {
    /// Case-insensitive substring of the client name
    pub name: Option<String>,
    /// Exact client type
    pub client_type: Option<ClientType>,
    /// Exact risk level
    pub risk_level: Option<RiskLevel>,
}

impl ClientQuery {
    /// Creates a query from optional criteria
    pub fn new(
        name: Option<&str>,
        client_type: Option<ClientType>,
        risk_level: Option<RiskLevel>,
    ) -> Self {
        Self {
            name: name.map(str::to_string),
            client_type,
            risk_level,
        }
    }

    /// Creates a query to find by name fragment
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Creates a query to find by risk level
    pub fn by_risk_level(risk_level: RiskLevel) -> Self {
        Self {
            risk_level: Some(risk_level),
            ..Default::default()
        }
    }

    /// Returns true when no criterion is set
    pub fn is_unconstrained(&self) -> bool {
        self.name.is_none() && self.client_type.is_none() && self.risk_level.is_none()
    }

    /// Evaluates the query against a single client
    pub fn matches(&self, client: &Client) -> bool {
        if let Some(ref name) = self.name {
            if !client.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(client_type) = self.client_type {
            if client.client_type != client_type {
                return false;
            }
        }
        if let Some(risk_level) = self.risk_level {
            if client.risk_level != risk_level {
                return false;
            }
        }
        true
    }
}

/// Port for client persistence
#[async_trait]
pub trait ClientRepository: DomainPort + HealthCheckable {
    /// Retrieves a client by ID, `None` when absent
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, PortError>;

    /// Checks whether a client exists
    async fn exists_by_id(&self, id: ClientId) -> Result<bool, PortError>;

    /// Persists a new client, assigning its ID and both timestamps
    async fn insert(&self, client: NewClient) -> Result<Client, PortError>;

    /// Persists changes to an existing client
    ///
    /// Refreshes `updated_at` to a value strictly later than the stored one and
    /// leaves `created_at` untouched. Returns `PortError::NotFound` if the
    /// client was never inserted.
    async fn save(&self, client: &Client) -> Result<Client, PortError>;

    /// Returns every client
    async fn find_all(&self) -> Result<Vec<Client>, PortError>;

    /// Returns clients with the given risk level
    async fn find_by_risk_level(&self, risk_level: RiskLevel) -> Result<Vec<Client>, PortError>;

    /// Returns clients with the given risk level ordered by name
    ///
    /// Ordering is byte-wise on the name, so it is deterministic and
    /// case-sensitive.
    async fn find_by_risk_level_order_by_name_asc(
        &self,
        risk_level: RiskLevel,
    ) -> Result<Vec<Client>, PortError>;

    /// Returns clients with the given client type
    async fn find_by_client_type(&self, client_type: ClientType) -> Result<Vec<Client>, PortError>;

    /// Returns clients matching every criterion of the query
    async fn search(&self, query: &ClientQuery) -> Result<Vec<Client>, PortError>;
}

/// Port for person persistence
#[async_trait]
pub trait PersonRepository: DomainPort + HealthCheckable {
    /// Retrieves a person by ID, `None` when absent
    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PortError>;

    /// Returns every person attached to a client
    async fn find_by_client_id(&self, client_id: ClientId) -> Result<Vec<Person>, PortError>;

    /// Returns persons with the given relationship type, across all clients
    async fn find_by_relationship_type(
        &self,
        relationship_type: RelationshipType,
    ) -> Result<Vec<Person>, PortError>;

    /// Returns every beneficial owner, across all clients
    async fn find_all_beneficial_owners(&self) -> Result<Vec<Person>, PortError> {
        self.find_by_relationship_type(RelationshipType::BeneficialOwner).await
    }

    /// Returns persons whose "first last" name contains the fragment, ignoring case
    async fn find_by_full_name_containing(&self, fragment: &str) -> Result<Vec<Person>, PortError>;

    /// Persists a new person under its client
    ///
    /// The client existence check and the insert happen atomically. Returns
    /// `PortError::NotFound` for entity type `"Client"` when the client does
    /// not exist, in which case nothing is written.
    async fn insert(&self, person: NewPerson) -> Result<Person, PortError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn client(name: &str, client_type: ClientType, risk_level: RiskLevel) -> Client {
        NewClient {
            name: name.to_string(),
            client_type,
            email: None,
            phone: None,
            registration_number: None,
            risk_level,
        }
        .into_client(ClientId::new(), Utc::now())
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = ClientQuery::default();
        assert!(query.is_unconstrained());
        assert!(query.matches(&client("Other", ClientType::Trust, RiskLevel::Medium)));
    }

    #[test]
    fn test_name_criterion_is_case_insensitive_substring() {
        let query = ClientQuery::by_name("abc");
        assert!(query.matches(&client("ABC Corp", ClientType::Company, RiskLevel::Low)));
        assert!(query.matches(&client("xabcx", ClientType::Individual, RiskLevel::Low)));
        assert!(!query.matches(&client("Other", ClientType::Company, RiskLevel::Low)));
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let query = ClientQuery::new(Some("corp"), Some(ClientType::Company), Some(RiskLevel::High));
        assert!(query.matches(&client("ABC Corp", ClientType::Company, RiskLevel::High)));
        assert!(!query.matches(&client("ABC Corp", ClientType::Company, RiskLevel::Low)));
        assert!(!query.matches(&client("ABC Corp", ClientType::Trust, RiskLevel::High)));
    }
}

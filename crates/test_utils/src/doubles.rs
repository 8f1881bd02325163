//! Repository Test Doubles
//!
//! [`FailingStore`] implements both KYC repository ports and fails every call
//! with a connection error, for exercising error paths in services and the
//! tool adapter.

use async_trait::async_trait;
use chrono::Utc;

use core_kernel::{
    AdapterHealth, ClientId, DomainPort, HealthCheckResult, HealthCheckable, PersonId, PortError,
};
use domain_kyc::{
    Client, ClientQuery, ClientRepository, ClientType, NewClient, NewPerson, Person,
    PersonRepository, RelationshipType, RiskLevel,
};

/// Repository double whose every operation fails
#[derive(Debug, Clone)]
pub struct FailingStore {
    message: String,
}

impl FailingStore {
    /// Creates a store failing with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn fail<T>(&self) -> Result<T, PortError> {
        Err(PortError::connection(self.message.clone()))
    }
}

impl Default for FailingStore {
    fn default() -> Self {
        Self::new("database unavailable")
    }
}

impl DomainPort for FailingStore {}

#[async_trait]
impl HealthCheckable for FailingStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: "failing-store".to_string(),
            status: AdapterHealth::Unhealthy,
            latency_ms: 0,
            message: Some(self.message.clone()),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ClientRepository for FailingStore {
    async fn find_by_id(&self, _id: ClientId) -> Result<Option<Client>, PortError> {
        self.fail()
    }

    async fn exists_by_id(&self, _id: ClientId) -> Result<bool, PortError> {
        self.fail()
    }

    async fn insert(&self, _client: NewClient) -> Result<Client, PortError> {
        self.fail()
    }

    async fn save(&self, _client: &Client) -> Result<Client, PortError> {
        self.fail()
    }

    async fn find_all(&self) -> Result<Vec<Client>, PortError> {
        self.fail()
    }

    async fn find_by_risk_level(&self, _risk_level: RiskLevel) -> Result<Vec<Client>, PortError> {
        self.fail()
    }

    async fn find_by_risk_level_order_by_name_asc(
        &self,
        _risk_level: RiskLevel,
    ) -> Result<Vec<Client>, PortError> {
        self.fail()
    }

    async fn find_by_client_type(&self, _client_type: ClientType) -> Result<Vec<Client>, PortError> {
        self.fail()
    }

    async fn search(&self, _query: &ClientQuery) -> Result<Vec<Client>, PortError> {
        self.fail()
    }
}

#[async_trait]
impl PersonRepository for FailingStore {
    async fn find_by_id(&self, _id: PersonId) -> Result<Option<Person>, PortError> {
        self.fail()
    }

    async fn find_by_client_id(&self, _client_id: ClientId) -> Result<Vec<Person>, PortError> {
        self.fail()
    }

    async fn find_by_relationship_type(
        &self,
        _relationship_type: RelationshipType,
    ) -> Result<Vec<Person>, PortError> {
        self.fail()
    }

    async fn find_by_full_name_containing(&self, _fragment: &str) -> Result<Vec<Person>, PortError> {
        self.fail()
    }

    async fn insert(&self, _person: NewPerson) -> Result<Person, PortError> {
        self.fail()
    }
}

//! In-memory KYC store
//!
//! Both repositories share one lock so that the client existence check and the
//! person insert are a single critical section.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{
    advance_timestamp, current_timestamp, AdapterHealth, ClientId, DomainPort,
    HealthCheckResult, HealthCheckable, PersonId, PortError,
};

use crate::client::{Client, ClientType, NewClient, RiskLevel};
use crate::person::{ClientRef, NewPerson, Person, RelationshipType};
use crate::ports::{ClientQuery, ClientRepository, PersonRepository};

#[derive(Debug, Default)]
struct StoreState {
    clients: BTreeMap<ClientId, Client>,
    persons: BTreeMap<PersonId, Person>,
}

/// Process-local implementation of both KYC repositories
#[derive(Debug, Clone, Default)]
pub struct InMemoryKycStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryKycStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted persons
    pub async fn person_count(&self) -> usize {
        self.state.read().await.persons.len()
    }

    async fn collect_clients<F>(&self, predicate: F) -> Vec<Client>
    where
        F: Fn(&Client) -> bool,
    {
        self.state
            .read()
            .await
            .clients
            .values()
            .filter(|c| predicate(c))
            .cloned()
            .collect()
    }

    async fn collect_persons<F>(&self, predicate: F) -> Vec<Person>
    where
        F: Fn(&Person) -> bool,
    {
        let state = self.state.read().await;
        state
            .persons
            .values()
            .filter(|p| predicate(p))
            .map(|p| with_current_client_name(p, &state.clients))
            .collect()
    }
}

/// Resolves the client name at read time, the way a join would
fn with_current_client_name(person: &Person, clients: &BTreeMap<ClientId, Client>) -> Person {
    let mut person = person.clone();
    if let Some(client) = clients.get(&person.client.id) {
        person.client.name = client.name.clone();
    }
    person
}

impl DomainPort for InMemoryKycStore {}

#[async_trait]
impl HealthCheckable for InMemoryKycStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: "in-memory-kyc-store".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: Some("In-memory store always healthy".to_string()),
            checked_at: current_timestamp(),
        }
    }
}

#[async_trait]
impl ClientRepository for InMemoryKycStore {
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, PortError> {
        Ok(self.state.read().await.clients.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: ClientId) -> Result<bool, PortError> {
        Ok(self.state.read().await.clients.contains_key(&id))
    }

    async fn insert(&self, client: NewClient) -> Result<Client, PortError> {
        let client = client.into_client(ClientId::new_v7(), current_timestamp());
        self.state
            .write()
            .await
            .clients
            .insert(client.id, client.clone());
        Ok(client)
    }

    async fn save(&self, client: &Client) -> Result<Client, PortError> {
        let mut state = self.state.write().await;
        let stored = state
            .clients
            .get_mut(&client.id)
            .ok_or_else(|| PortError::not_found("Client", client.id))?;

        let updated_at = advance_timestamp(stored.updated_at);
        *stored = Client {
            created_at: stored.created_at,
            updated_at,
            ..client.clone()
        };
        Ok(stored.clone())
    }

    async fn find_all(&self) -> Result<Vec<Client>, PortError> {
        Ok(self.collect_clients(|_| true).await)
    }

    async fn find_by_risk_level(&self, risk_level: RiskLevel) -> Result<Vec<Client>, PortError> {
        Ok(self.collect_clients(|c| c.risk_level == risk_level).await)
    }

    async fn find_by_risk_level_order_by_name_asc(
        &self,
        risk_level: RiskLevel,
    ) -> Result<Vec<Client>, PortError> {
        let mut clients = self.collect_clients(|c| c.risk_level == risk_level).await;
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    async fn find_by_client_type(&self, client_type: ClientType) -> Result<Vec<Client>, PortError> {
        Ok(self.collect_clients(|c| c.client_type == client_type).await)
    }

    async fn search(&self, query: &ClientQuery) -> Result<Vec<Client>, PortError> {
        Ok(self.collect_clients(|c| query.matches(c)).await)
    }
}

#[async_trait]
impl PersonRepository for InMemoryKycStore {
    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PortError> {
        let state = self.state.read().await;
        Ok(state
            .persons
            .get(&id)
            .map(|p| with_current_client_name(p, &state.clients)))
    }

    async fn find_by_client_id(&self, client_id: ClientId) -> Result<Vec<Person>, PortError> {
        Ok(self.collect_persons(|p| p.client.id == client_id).await)
    }

    async fn find_by_relationship_type(
        &self,
        relationship_type: RelationshipType,
    ) -> Result<Vec<Person>, PortError> {
        Ok(self
            .collect_persons(|p| p.relationship_type == relationship_type)
            .await)
    }

    async fn find_by_full_name_containing(&self, fragment: &str) -> Result<Vec<Person>, PortError> {
        let fragment = fragment.to_lowercase();
        Ok(self
            .collect_persons(|p| p.full_name().to_lowercase().contains(&fragment))
            .await)
    }

    async fn insert(&self, person: NewPerson) -> Result<Person, PortError> {
        let mut state = self.state.write().await;

        let client = state
            .clients
            .get(&person.client_id)
            .map(|c| ClientRef {
                id: c.id,
                name: c.name.clone(),
            })
            .ok_or_else(|| PortError::not_found("Client", person.client_id))?;

        let person = person.into_person(PersonId::new_v7(), client, current_timestamp());
        state.persons.insert(person.id, person.clone());
        Ok(person)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_client(name: &str, risk_level: RiskLevel) -> NewClient {
        NewClient {
            name: name.to_string(),
            client_type: ClientType::Company,
            email: None,
            phone: None,
            registration_number: None,
            risk_level,
        }
    }

    fn new_person(client_id: ClientId, relationship_type: RelationshipType) -> NewPerson {
        NewPerson {
            client_id,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: None,
            phone: None,
            date_of_birth: None,
            nationality: None,
            identification_number: None,
            relationship_type,
            position_title: None,
            ownership_percentage: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_identity_and_timestamps() {
        let store = InMemoryKycStore::new();
        let client = ClientRepository::insert(&store, new_client("ABC Corp", RiskLevel::Low))
            .await
            .unwrap();

        assert_eq!(client.created_at, client.updated_at);
        assert!(store.exists_by_id(client.id).await.unwrap());
        assert_eq!(
            ClientRepository::find_by_id(&store, client.id).await.unwrap(),
            Some(client)
        );
    }

    #[tokio::test]
    async fn test_save_refreshes_updated_at_only() {
        let store = InMemoryKycStore::new();
        let mut client = ClientRepository::insert(&store, new_client("ABC Corp", RiskLevel::Low))
            .await
            .unwrap();
        let created_at = client.created_at;

        client.change_risk_level(RiskLevel::High);
        let saved = store.save(&client).await.unwrap();

        assert_eq!(saved.risk_level, RiskLevel::High);
        assert_eq!(saved.created_at, created_at);
        assert!(saved.updated_at > created_at);
    }

    #[tokio::test]
    async fn test_save_unknown_client_is_not_found() {
        let store = InMemoryKycStore::new();
        let client = new_client("Ghost", RiskLevel::Low).into_client(ClientId::new(), current_timestamp());
        let error = store.save(&client).await.unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_order_by_name_is_byte_wise() {
        let store = InMemoryKycStore::new();
        for name in ["charlie", "Bravo", "Alpha"] {
            ClientRepository::insert(&store, new_client(name, RiskLevel::High))
                .await
                .unwrap();
        }
        let names: Vec<_> = store
            .find_by_risk_level_order_by_name_asc(RiskLevel::High)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "charlie"]);
    }

    #[tokio::test]
    async fn test_person_insert_for_missing_client_writes_nothing() {
        let store = InMemoryKycStore::new();
        let error = PersonRepository::insert(
            &store,
            new_person(ClientId::new(), RelationshipType::Director),
        )
        .await
        .unwrap_err();

        assert!(error.is_not_found());
        assert_eq!(store.person_count().await, 0);
    }

    #[tokio::test]
    async fn test_person_queries() {
        let store = InMemoryKycStore::new();
        let client = ClientRepository::insert(&store, new_client("ABC Corp", RiskLevel::Low))
            .await
            .unwrap();
        let owner = PersonRepository::insert(
            &store,
            new_person(client.id, RelationshipType::BeneficialOwner),
        )
        .await
        .unwrap();
        PersonRepository::insert(&store, new_person(client.id, RelationshipType::Director))
            .await
            .unwrap();

        assert_eq!(owner.client.name, "ABC Corp");
        assert_eq!(store.find_by_client_id(client.id).await.unwrap().len(), 2);
        assert_eq!(store.find_all_beneficial_owners().await.unwrap(), vec![owner]);
        assert_eq!(store.find_by_full_name_containing("JANE d").await.unwrap().len(), 2);
        assert!(store.find_by_client_id(ClientId::new()).await.unwrap().is_empty());
    }
}

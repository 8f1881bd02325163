//! Read-only projections returned to callers
//!
//! Conversions are pure functions over entities. They never touch a repository,
//! so the lazy-loading boundary lives entirely in the services: only
//! `ClientView::with_persons` attaches persons, and only the client-details
//! lookup calls it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClientId, PersonId};
use crate::client::{Client, ClientType, RiskLevel};
use crate::person::{Person, RelationshipType};

/// Client projection
///
/// `persons` is `None` unless the client was loaded through the details lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientView {
    pub id: ClientId,
    pub name: String,
    pub client_type: ClientType,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub registration_number: Option<String>,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub persons: Option<Vec<PersonView>>,
}

impl ClientView {
    /// Projects a client without its persons
    pub fn from_entity(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            client_type: client.client_type,
            email: client.email.clone(),
            phone: client.phone.clone(),
            registration_number: client.registration_number.clone(),
            risk_level: client.risk_level,
            created_at: client.created_at,
            updated_at: client.updated_at,
            persons: None,
        }
    }

    /// Projects a client together with its pre-fetched persons
    pub fn with_persons(client: &Client, persons: &[Person]) -> Self {
        Self {
            persons: Some(persons.iter().map(PersonView::from_entity).collect()),
            ..Self::from_entity(client)
        }
    }

    /// Projects a list of clients without persons
    pub fn from_list(clients: &[Client]) -> Vec<Self> {
        clients.iter().map(Self::from_entity).collect()
    }
}

impl From<&Client> for ClientView {
    fn from(client: &Client) -> Self {
        Self::from_entity(client)
    }
}

/// Person projection, including the owning client's id and name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonView {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub identification_number: Option<String>,
    pub relationship_type: RelationshipType,
    pub position_title: Option<String>,
    pub ownership_percentage: Option<Decimal>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub client_id: ClientId,
    pub client_name: String,
}

impl PersonView {
    /// Projects a person
    pub fn from_entity(person: &Person) -> Self {
        Self {
            id: person.id,
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            full_name: person.full_name(),
            email: person.email.clone(),
            phone: person.phone.clone(),
            date_of_birth: person.date_of_birth,
            nationality: person.nationality.clone(),
            identification_number: person.identification_number.clone(),
            relationship_type: person.relationship_type,
            position_title: person.position_title.clone(),
            ownership_percentage: person.ownership_percentage,
            address: person.address.clone(),
            created_at: person.created_at,
            updated_at: person.updated_at,
            client_id: person.client.id,
            client_name: person.client.name.clone(),
        }
    }

    /// Projects a list of persons
    pub fn from_list(persons: &[Person]) -> Vec<Self> {
        persons.iter().map(Self::from_entity).collect()
    }
}

impl From<&Person> for PersonView {
    fn from(person: &Person) -> Self {
        Self::from_entity(person)
    }
}

//! Person orchestration: attaching persons to clients and person lookups

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use core_kernel::{ClientId, PortError};

use crate::error::KycError;
use crate::person::RelationshipType;
use crate::ports::{ClientRepository, PersonRepository};
use crate::requests::CreatePersonRequest;
use crate::validation::RequestValidator;
use crate::views::PersonView;

/// Service for person operations
#[derive(Clone)]
pub struct PersonService {
    persons: Arc<dyn PersonRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl PersonService {
    /// Creates a new person service
    pub fn new(persons: Arc<dyn PersonRepository>, clients: Arc<dyn ClientRepository>) -> Self {
        Self { persons, clients }
    }

    /// Attaches a new person to an existing client
    ///
    /// Fails with [`KycError::ClientNotFound`] when the client does not exist,
    /// without writing anything.
    #[instrument(skip(self, request), fields(client_id = %request.client_id))]
    pub async fn add_person_to_client(
        &self,
        request: CreatePersonRequest,
    ) -> Result<PersonView, KycError> {
        debug!("Adding person {} {} to client", request.first_name, request.last_name);

        let request = request.normalized();
        for warning in RequestValidator::validate_person(&request).into_result()? {
            warn!("{}", warning);
        }

        let client_id = request.client_id;
        if !self.clients.exists_by_id(client_id).await? {
            return Err(KycError::ClientNotFound(client_id));
        }

        match self.persons.insert(request.into_new_person()).await {
            Ok(person) => {
                info!(
                    person_id = %person.id,
                    client_name = %person.client.name,
                    "Successfully added person {} to client",
                    person.full_name()
                );
                Ok(PersonView::from_entity(&person))
            }
            // The client can disappear between the check and the insert.
            Err(PortError::NotFound { .. }) => Err(KycError::ClientNotFound(client_id)),
            Err(e) => {
                error!(error = %e, "Error adding person to client");
                Err(KycError::persistence("Failed to add person to client", e))
            }
        }
    }

    /// Returns every person of a client; empty for an absent id
    #[instrument(skip(self))]
    pub async fn get_persons_by_client(
        &self,
        client_id: Option<ClientId>,
    ) -> Result<Vec<PersonView>, KycError> {
        let Some(client_id) = client_id else {
            warn!("Client ID is absent, returning empty list");
            return Ok(Vec::new());
        };
        let persons = self.persons.find_by_client_id(client_id).await?;
        debug!("Found {} persons", persons.len());
        Ok(PersonView::from_list(&persons))
    }

    /// Returns every beneficial owner across all clients
    #[instrument(skip(self))]
    pub async fn get_beneficial_owners(&self) -> Result<Vec<PersonView>, KycError> {
        let persons = self.persons.find_all_beneficial_owners().await?;
        debug!("Found {} beneficial owners", persons.len());
        Ok(PersonView::from_list(&persons))
    }

    /// Returns persons with the given relationship; empty when it is absent
    #[instrument(skip(self))]
    pub async fn get_persons_by_relationship(
        &self,
        relationship_type: Option<RelationshipType>,
    ) -> Result<Vec<PersonView>, KycError> {
        let Some(relationship_type) = relationship_type else {
            warn!("Relationship type is absent, returning empty list");
            return Ok(Vec::new());
        };
        let persons = self.persons.find_by_relationship_type(relationship_type).await?;
        debug!("Found {} persons with relationship {}", persons.len(), relationship_type);
        Ok(PersonView::from_list(&persons))
    }

    /// Returns persons whose full name contains the fragment, ignoring case
    ///
    /// Empty for an absent or blank fragment.
    #[instrument(skip(self))]
    pub async fn search_persons_by_name(
        &self,
        fragment: Option<&str>,
    ) -> Result<Vec<PersonView>, KycError> {
        let Some(fragment) = fragment.map(str::trim).filter(|f| !f.is_empty()) else {
            return Ok(Vec::new());
        };
        let persons = self.persons.find_by_full_name_containing(fragment).await?;
        debug!("Found {} persons matching name", persons.len());
        Ok(PersonView::from_list(&persons))
    }
}

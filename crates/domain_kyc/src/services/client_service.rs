//! Client orchestration: creation, search, details, and risk-level updates

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use core_kernel::ClientId;

use crate::client::{ClientType, RiskLevel};
use crate::error::KycError;
use crate::ports::{ClientQuery, ClientRepository, PersonRepository};
use crate::requests::CreateClientRequest;
use crate::validation::RequestValidator;
use crate::views::ClientView;

/// Service for client operations
#[derive(Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientRepository>,
    persons: Arc<dyn PersonRepository>,
}

impl ClientService {
    /// Creates a new client service
    pub fn new(clients: Arc<dyn ClientRepository>, persons: Arc<dyn PersonRepository>) -> Self {
        Self { clients, persons }
    }

    /// Registers a new client
    ///
    /// The request is trimmed and validated before anything is written. A
    /// missing risk level defaults to LOW.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_client(&self, request: CreateClientRequest) -> Result<ClientView, KycError> {
        debug!("Creating new client");

        let request = request.normalized();
        for warning in RequestValidator::validate_client(&request).into_result()? {
            warn!("{}", warning);
        }

        let name = request.name.clone();
        match self.clients.insert(request.into_new_client()).await {
            Ok(client) => {
                info!(client_id = %client.id, name = %client.name, "Successfully created client");
                Ok(ClientView::from_entity(&client))
            }
            Err(e) => {
                error!(name = %name, error = %e, "Error creating client");
                Err(KycError::persistence("Failed to create client", e))
            }
        }
    }

    /// Searches clients by any combination of name fragment, type and risk level
    ///
    /// Absent criteria impose no constraint. Views carry no persons.
    #[instrument(skip(self))]
    pub async fn search_clients(
        &self,
        name: Option<&str>,
        client_type: Option<ClientType>,
        risk_level: Option<RiskLevel>,
    ) -> Result<Vec<ClientView>, KycError> {
        let query = ClientQuery::new(name, client_type, risk_level);
        let clients = self.clients.search(&query).await?;
        debug!("Found {} clients matching search criteria", clients.len());
        Ok(ClientView::from_list(&clients))
    }

    /// Returns the client with all of its persons
    ///
    /// This is the only operation that loads persons.
    #[instrument(skip(self))]
    pub async fn get_client_details(
        &self,
        client_id: Option<ClientId>,
    ) -> Result<Option<ClientView>, KycError> {
        let Some(client_id) = client_id else {
            warn!("Client ID is absent");
            return Ok(None);
        };

        let Some(client) = self.clients.find_by_id(client_id).await? else {
            debug!("Client not found");
            return Ok(None);
        };

        let persons = self.persons.find_by_client_id(client_id).await?;
        debug!("Found {} persons for client {}", persons.len(), client.name);
        Ok(Some(ClientView::with_persons(&client, &persons)))
    }

    /// Returns every client
    #[instrument(skip(self))]
    pub async fn get_all_clients(&self) -> Result<Vec<ClientView>, KycError> {
        let clients = self.clients.find_all().await?;
        debug!("Retrieved {} clients", clients.len());
        Ok(ClientView::from_list(&clients))
    }

    /// Returns HIGH risk clients sorted by name for compliance review
    #[instrument(skip(self))]
    pub async fn get_high_risk_clients(&self) -> Result<Vec<ClientView>, KycError> {
        let clients = self
            .clients
            .find_by_risk_level_order_by_name_asc(RiskLevel::High)
            .await?;
        debug!("Found {} high-risk clients", clients.len());
        Ok(ClientView::from_list(&clients))
    }

    /// Changes a client's risk level
    ///
    /// Returns `None` when the client id is absent or unknown. Otherwise fails
    /// with a validation error when the new level is absent. Concurrent updates are
    /// last-write-wins.
    #[instrument(skip(self))]
    pub async fn update_client_risk_level(
        &self,
        client_id: Option<ClientId>,
        new_risk_level: Option<RiskLevel>,
    ) -> Result<Option<ClientView>, KycError> {
        let Some(client_id) = client_id else {
            warn!("Client ID is absent for risk level update");
            return Ok(None);
        };

        let Some(new_risk_level) = new_risk_level else {
            return Err(KycError::invalid("New risk level cannot be null"));
        };

        let Some(mut client) = self.clients.find_by_id(client_id).await? else {
            debug!("Client not found");
            return Ok(None);
        };

        let old_risk_level = client.change_risk_level(new_risk_level);
        let saved = self
            .clients
            .save(&client)
            .await
            .map_err(|e| KycError::persistence("Failed to update client risk level", e))?;

        info!(
            client_id = %client_id,
            from = %old_risk_level,
            to = %new_risk_level,
            "Updated client risk level"
        );
        Ok(Some(ClientView::from_entity(&saved)))
    }

    /// Returns true if the client exists; false for an absent id
    #[instrument(skip(self))]
    pub async fn client_exists(&self, client_id: Option<ClientId>) -> Result<bool, KycError> {
        let Some(client_id) = client_id else {
            return Ok(false);
        };
        let exists = self.clients.exists_by_id(client_id).await?;
        debug!(exists, "Checked client existence");
        Ok(exists)
    }

    /// Returns clients of the given type; empty when the type is absent
    #[instrument(skip(self))]
    pub async fn get_clients_by_type(
        &self,
        client_type: Option<ClientType>,
    ) -> Result<Vec<ClientView>, KycError> {
        let Some(client_type) = client_type else {
            warn!("Client type is absent, returning empty list");
            return Ok(Vec::new());
        };
        let clients = self.clients.find_by_client_type(client_type).await?;
        debug!("Found {} clients with type {}", clients.len(), client_type);
        Ok(ClientView::from_list(&clients))
    }

    /// Returns clients with the given risk level; empty when the level is absent
    #[instrument(skip(self))]
    pub async fn get_clients_by_risk_level(
        &self,
        risk_level: Option<RiskLevel>,
    ) -> Result<Vec<ClientView>, KycError> {
        let Some(risk_level) = risk_level else {
            warn!("Risk level is absent, returning empty list");
            return Ok(Vec::new());
        };
        let clients = self.clients.find_by_risk_level(risk_level).await?;
        debug!("Found {} clients with risk level {}", clients.len(), risk_level);
        Ok(ClientView::from_list(&clients))
    }
}

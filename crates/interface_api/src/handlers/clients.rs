//! Client handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use domain_kyc::{ClientType, ClientView, CreateClientRequest, PersonView, RiskLevel};

use super::parse_client_id;
use crate::{error::ApiError, AppState};

/// Search criteria, all optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSearchParams {
    pub name: Option<String>,
    pub client_type: Option<ClientType>,
    pub risk_level: Option<RiskLevel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTypeParams {
    pub client_type: Option<ClientType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskLevelParams {
    pub risk_level: Option<RiskLevel>,
}

/// Body of a risk-level update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRiskLevelRequest {
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Searches clients by name fragment, type and risk level
pub async fn search_clients(
    State(state): State<AppState>,
    Query(params): Query<ClientSearchParams>,
) -> Result<Json<Vec<ClientView>>, ApiError> {
    let clients = state
        .clients
        .search_clients(params.name.as_deref(), params.client_type, params.risk_level)
        .await?;
    Ok(Json(clients))
}

/// Registers a new client
pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<ClientView>), ApiError> {
    let client = state.clients.create_client(request).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Lists HIGH risk clients by name
pub async fn high_risk_clients(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClientView>>, ApiError> {
    Ok(Json(state.clients.get_high_risk_clients().await?))
}

pub async fn clients_by_type(
    State(state): State<AppState>,
    Query(params): Query<ClientTypeParams>,
) -> Result<Json<Vec<ClientView>>, ApiError> {
    Ok(Json(state.clients.get_clients_by_type(params.client_type).await?))
}

pub async fn clients_by_risk_level(
    State(state): State<AppState>,
    Query(params): Query<RiskLevelParams>,
) -> Result<Json<Vec<ClientView>>, ApiError> {
    Ok(Json(state.clients.get_clients_by_risk_level(params.risk_level).await?))
}

/// Gets a client with its persons
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClientView>, ApiError> {
    let client_id = parse_client_id(&id)?;
    state
        .clients
        .get_client_details(Some(client_id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Client not found with ID: {}", client_id)))
}

pub async fn client_exists(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let client_id = parse_client_id(&id)?;
    let exists = state.clients.client_exists(Some(client_id)).await?;
    Ok(Json(ExistsResponse { exists }))
}

/// Changes a client's risk level
pub async fn update_risk_level(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRiskLevelRequest>,
) -> Result<Json<ClientView>, ApiError> {
    let client_id = parse_client_id(&id)?;
    state
        .clients
        .update_client_risk_level(Some(client_id), request.risk_level)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Client not found with ID: {}", client_id)))
}

/// Lists the persons of a client
pub async fn client_persons(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PersonView>>, ApiError> {
    let client_id = parse_client_id(&id)?;
    Ok(Json(state.persons.get_persons_by_client(Some(client_id)).await?))
}

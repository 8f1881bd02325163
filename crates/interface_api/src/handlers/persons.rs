//! Person handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use domain_kyc::{CreatePersonRequest, PersonView, RelationshipType};

use crate::{error::ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct NameParams {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipParams {
    pub relationship_type: Option<RelationshipType>,
}

/// Attaches a new person to an existing client
pub async fn add_person(
    State(state): State<AppState>,
    Json(request): Json<CreatePersonRequest>,
) -> Result<(StatusCode, Json<PersonView>), ApiError> {
    let person = state.persons.add_person_to_client(request).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

pub async fn beneficial_owners(
    State(state): State<AppState>,
) -> Result<Json<Vec<PersonView>>, ApiError> {
    Ok(Json(state.persons.get_beneficial_owners().await?))
}

/// Searches persons by full name fragment
pub async fn search_persons(
    State(state): State<AppState>,
    Query(params): Query<NameParams>,
) -> Result<Json<Vec<PersonView>>, ApiError> {
    Ok(Json(state.persons.search_persons_by_name(params.name.as_deref()).await?))
}

pub async fn persons_by_relationship(
    State(state): State<AppState>,
    Query(params): Query<RelationshipParams>,
) -> Result<Json<Vec<PersonView>>, ApiError> {
    Ok(Json(
        state
            .persons
            .get_persons_by_relationship(params.relationship_type)
            .await?,
    ))
}

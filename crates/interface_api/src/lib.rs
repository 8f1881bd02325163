//! HTTP API Layer
//!
//! This crate exposes the KYC registry over REST using Axum, and the
//! `search_clients` tool over both a debug HTTP route and an MCP stdio server.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for clients, persons, debug tools and health
//! - **Tools**: The assistant-facing tool adapter and its catalogue
//! - **MCP**: JSON-RPC stdio transport for the tools
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{bootstrap::build_state, config::ApiConfig, create_router};
//!
//! let config = ApiConfig::from_env()?;
//! let app = create_router(build_state(&config).await?);
//! axum::serve(listener, app).await?;
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mcp;
pub mod tools;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_kyc::{ClientRepository, ClientService, PersonRepository, PersonService};

use crate::handlers::{clients, debug, health, persons};
use crate::tools::KycTools;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub clients: ClientService,
    pub persons: PersonService,
    pub tools: KycTools,
    client_repository: Arc<dyn ClientRepository>,
    person_repository: Arc<dyn PersonRepository>,
}

impl AppState {
    /// Wires the services over the given repositories
    pub fn new(
        client_repository: Arc<dyn ClientRepository>,
        person_repository: Arc<dyn PersonRepository>,
    ) -> Self {
        let clients = ClientService::new(client_repository.clone(), person_repository.clone());
        let persons = PersonService::new(person_repository.clone(), client_repository.clone());
        Self {
            tools: KycTools::new(clients.clone()),
            clients,
            persons,
            client_repository,
            person_repository,
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Client routes
    let client_routes = Router::new()
        .route("/", get(clients::search_clients).post(clients::create_client))
        .route("/high-risk", get(clients::high_risk_clients))
        .route("/by-type", get(clients::clients_by_type))
        .route("/by-risk-level", get(clients::clients_by_risk_level))
        .route("/:id", get(clients::get_client))
        .route("/:id/exists", get(clients::client_exists))
        .route("/:id/risk-level", put(clients::update_risk_level))
        .route("/:id/persons", get(clients::client_persons));

    // Person routes
    let person_routes = Router::new()
        .route("/", post(persons::add_person))
        .route("/beneficial-owners", get(persons::beneficial_owners))
        .route("/search", get(persons::search_persons))
        .route("/by-relationship", get(persons::persons_by_relationship));

    // Tool routes for exercising the assistant tools over HTTP
    let debug_routes = Router::new()
        .route("/search-clients", get(debug::search_clients))
        .route("/tools", get(debug::list_tools));

    let api_routes = Router::new()
        .nest("/clients", client_routes)
        .nest("/persons", person_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .nest("/api/debug", debug_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain_kyc::InMemoryKycStore;
    use tower::ServiceExt;

    fn router() -> Router {
        let store = Arc::new(InMemoryKycStore::new());
        create_router(AppState::new(store.clone(), store))
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = router()
            .oneshot(Request::builder().uri("/api/v1/accounts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

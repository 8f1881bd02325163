//! Tool handlers for exercising the assistant tools over HTTP

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::tools::{tool_catalogue, SEARCH_CLIENTS};
use crate::AppState;

/// Raw tool arguments; the risk level is parsed by the tool itself
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchClientsParams {
    pub name: Option<String>,
    pub risk_level: Option<String>,
}

/// Runs `search_clients` and returns its envelope as-is
pub async fn search_clients(
    State(state): State<AppState>,
    Query(params): Query<SearchClientsParams>,
) -> Json<Value> {
    info!(name = ?params.name, risk_level = ?params.risk_level, "Testing search_clients over HTTP");
    let arguments = json!({ "name": params.name, "riskLevel": params.risk_level });
    Json(state.tools.call(SEARCH_CLIENTS, arguments).await.to_value())
}

/// Lists the available tools with their schemas
pub async fn list_tools() -> Json<Value> {
    let tools: Map<String, Value> = tool_catalogue()
        .iter()
        .map(|tool| {
            (
                tool.name.to_string(),
                json!({
                    "description": tool.description,
                    "inputSchema": tool.input_schema,
                    "testUrl": format!("/api/debug/{}?name=ABC&riskLevel=HIGH", tool.name.replace('_', "-")),
                }),
            )
        })
        .collect();

    Json(json!({
        "message": "Available KYC MCP Tools",
        "tools": tools,
    }))
}

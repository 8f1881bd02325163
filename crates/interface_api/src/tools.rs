//! Assistant-facing tools
//!
//! Tools never return errors. Every outcome, including internal failures and
//! malformed arguments, is reported through a [`ToolResponse`] envelope.

use chrono::{DateTime, Utc};
use domain_kyc::{ClientService, ClientView, KycError, RiskLevel};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

/// Name of the client search tool
pub const SEARCH_CLIENTS: &str = "search_clients";

const ANY: &str = "any";

/// A tool as advertised to assistants
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

static TOOL_CATALOGUE: Lazy<Vec<ToolDefinition>> = Lazy::new(|| {
    let risk_levels: Vec<&str> = RiskLevel::ALL.iter().map(RiskLevel::as_str).collect();
    vec![ToolDefinition {
        name: SEARCH_CLIENTS,
        description: "Search for KYC clients by name (partial match), or risk level. \
                      All parameters are optional. Returns a list of matching clients \
                      with basic information.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": ["string", "null"],
                    "description": "Partial client name, matched case-insensitively"
                },
                "riskLevel": {
                    "type": ["string", "null"],
                    "enum": risk_levels,
                    "description": "Risk level to filter by"
                }
            }
        }),
    }]
});

/// Returns every tool this server exposes
pub fn tool_catalogue() -> &'static [ToolDefinition] {
    &TOOL_CATALOGUE
}

/// Criteria echoed back in a successful search, `"any"` for absent ones
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub name: String,
    pub risk_level: String,
}

/// Successful `search_clients` outcome
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchClientsResult {
    pub success: bool,
    pub message: String,
    pub count: usize,
    pub clients: Vec<ClientView>,
    pub search_criteria: SearchCriteria,
}

/// Failed tool outcome
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolFailure {
    pub success: bool,
    pub error: String,
    pub tool: String,
    pub timestamp: DateTime<Utc>,
}

impl ToolFailure {
    fn new(tool: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            tool: tool.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Envelope returned by every tool invocation
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ToolResponse {
    SearchClients(SearchClientsResult),
    Failure(ToolFailure),
}

impl ToolResponse {
    /// Returns true for success envelopes
    pub fn is_success(&self) -> bool {
        !matches!(self, ToolResponse::Failure(_))
    }

    /// Renders the envelope as a JSON value
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            json!({ "success": false, "error": e.to_string() })
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SearchClientsArgs {
    name: Option<String>,
    risk_level: Option<String>,
}

/// Tool adapter over the client service
#[derive(Clone)]
pub struct KycTools {
    clients: ClientService,
}

impl KycTools {
    pub fn new(clients: ClientService) -> Self {
        Self { clients }
    }

    /// Searches clients by optional name fragment and risk level
    ///
    /// Client type filtering is not exposed through the tool.
    pub async fn search_clients(
        &self,
        name: Option<&str>,
        risk_level: Option<RiskLevel>,
    ) -> ToolResponse {
        info!(?name, ?risk_level, "Tool '{}' called", SEARCH_CLIENTS);

        match self.clients.search_clients(name, None, risk_level).await {
            Ok(clients) => {
                info!(count = clients.len(), "Tool '{}' completed", SEARCH_CLIENTS);
                ToolResponse::SearchClients(SearchClientsResult {
                    success: true,
                    message: format!("Found {} clients matching search criteria", clients.len()),
                    count: clients.len(),
                    clients,
                    search_criteria: SearchCriteria {
                        name: name.unwrap_or(ANY).to_string(),
                        risk_level: risk_level.map_or(ANY, |r| r.as_str()).to_string(),
                    },
                })
            }
            Err(e) => {
                error!(error = %e, "Error in tool '{}'", SEARCH_CLIENTS);
                ToolResponse::Failure(ToolFailure::new(SEARCH_CLIENTS, flatten(&e)))
            }
        }
    }

    /// Dispatches a call by tool name with loosely-typed JSON arguments
    pub async fn call(&self, tool_name: &str, arguments: Value) -> ToolResponse {
        match tool_name {
            SEARCH_CLIENTS => {
                let args = match parse_args::<SearchClientsArgs>(arguments) {
                    Ok(args) => args,
                    Err(message) => {
                        return ToolResponse::Failure(ToolFailure::new(tool_name, message))
                    }
                };
                let risk_level = match args.risk_level.as_deref().map(str::parse::<RiskLevel>) {
                    None => None,
                    Some(Ok(level)) => Some(level),
                    Some(Err(e)) => {
                        return ToolResponse::Failure(ToolFailure::new(tool_name, flatten(&e)))
                    }
                };
                self.search_clients(args.name.as_deref(), risk_level).await
            }
            other => ToolResponse::Failure(ToolFailure::new(
                other,
                format!("Unknown tool: {}", other),
            )),
        }
    }
}

fn parse_args<T: Default + for<'de> Deserialize<'de>>(arguments: Value) -> Result<T, String> {
    if arguments.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))
}

fn flatten(error: &KycError) -> String {
    match error {
        KycError::Validation(message) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_lists_risk_levels_verbatim() {
        let tools = tool_catalogue();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, SEARCH_CLIENTS);
        assert_eq!(
            tools[0].input_schema["properties"]["riskLevel"]["enum"],
            json!(["LOW", "MEDIUM", "HIGH"])
        );
    }

    #[test]
    fn test_failure_envelope_shape() {
        let response = ToolResponse::Failure(ToolFailure::new(SEARCH_CLIENTS, "boom"));
        let value = response.to_value();
        assert!(!response.is_success());
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"], json!("boom"));
        assert_eq!(value["tool"], json!("search_clients"));
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_null_arguments_parse_as_defaults() {
        let args: SearchClientsArgs = parse_args(Value::Null).unwrap();
        assert!(args.name.is_none() && args.risk_level.is_none());
        assert!(parse_args::<SearchClientsArgs>(json!({"name": 42})).is_err());
    }
}

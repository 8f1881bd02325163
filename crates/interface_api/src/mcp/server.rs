//! MCP Server
//!
//! Main loop handling JSON-RPC messages over a line-delimited stream.

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use super::protocol::*;
use crate::tools::{tool_catalogue, KycTools};

const SERVER_NAME: &str = "kyc-mcp";

/// MCP Server
pub struct McpServer {
    tools: KycTools,
}

impl McpServer {
    pub fn new(tools: KycTools) -> Self {
        Self { tools }
    }

    /// Runs the server over stdin/stdout until stdin closes
    pub async fn run_stdio(&self) -> anyhow::Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await
    }

    /// Reads one request per line and writes one response per line
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("MCP server started, waiting for messages");
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            debug!(message = %preview(&line), "<-");

            let Some(response) = self.handle(&line).await else {
                continue;
            };
            let out = serde_json::to_string(&response)?;
            debug!(message = %preview(&out), "->");

            writer.write_all(out.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        info!("MCP server shutting down");
        Ok(())
    }

    /// Handles a single JSON-RPC message; notifications yield no response
    pub async fn handle(&self, msg: &str) -> Option<JsonRpcResponse> {
        let req: JsonRpcRequest = match serde_json::from_str(msg) {
            Ok(r) => r,
            Err(e) => return Some(JsonRpcResponse::error(None, PARSE_ERROR, e.to_string())),
        };

        if req.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                req.id,
                INVALID_REQUEST,
                "Only JSON-RPC 2.0 is supported",
            ));
        }

        if req.is_notification() {
            debug!(method = %req.method, "Notification received");
            return None;
        }

        let id = req.id.clone();
        let response = match req.method.as_str() {
            "initialize" => respond(
                id,
                InitializeResult {
                    protocol_version: PROTOCOL_VERSION.into(),
                    capabilities: ServerCapabilities {
                        tools: ToolsCapability {
                            list_changed: false,
                        },
                    },
                    server_info: ServerInfo {
                        name: SERVER_NAME.into(),
                        version: env!("CARGO_PKG_VERSION").into(),
                    },
                },
            ),

            "notifications/initialized" => JsonRpcResponse::success(id, Value::Null),

            "ping" => JsonRpcResponse::success(id, Value::Object(Default::default())),

            "tools/list" => respond(
                id,
                ToolsListResult {
                    tools: tool_catalogue(),
                },
            ),

            "tools/call" => {
                let params: ToolCallParams = match serde_json::from_value(req.params) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string()))
                    }
                };

                info!(tool = %params.name, "Calling tool");
                let result = self.tools.call(&params.name, params.arguments).await;
                respond(id, ToolCallResult::from(&result))
            }

            other => {
                warn!(method = %other, "Unknown method");
                JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Unknown method: {}", other))
            }
        };
        Some(response)
    }
}

fn respond(id: Option<Value>, result: impl Serialize) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcResponse::success(id, v),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Serialization error: {}", e)),
    }
}

fn preview(line: &str) -> String {
    match line.char_indices().nth(100) {
        Some((idx, _)) => format!("{}...", &line[..idx]),
        None => line.to_string(),
    }
}

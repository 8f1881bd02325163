//! KYC Registry - MCP Server Binary
//!
//! Serves the KYC tools to Model Context Protocol clients over stdio. Stdout
//! carries only JSON-RPC messages; logs go to stderr.
//!
//! Uses the same `KYC_` environment variables as `kyc-api`.

use anyhow::Context;
use interface_api::{
    bootstrap::{build_state, init_tracing},
    config::ApiConfig,
    mcp::McpServer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config.log_level);

    tracing::info!(storage = ?config.storage, "Starting KYC MCP server");

    let state = build_state(&config).await?;
    McpServer::new(state.tools).run_stdio().await
}

//! MCP stdio transport
//!
//! JSON-RPC 2.0 messages, one per line, exposing the tools in
//! [`crate::tools`] to Model Context Protocol clients.

pub mod protocol;
pub mod server;

pub use server::McpServer;

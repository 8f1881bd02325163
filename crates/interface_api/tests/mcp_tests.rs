//! Tool adapter and MCP transport tests

use std::sync::Arc;

use serde_json::{json, Value};

use domain_kyc::{ClientService, InMemoryKycStore, RiskLevel};
use interface_api::mcp::McpServer;
use interface_api::tools::{KycTools, ToolResponse, SEARCH_CLIENTS};
use test_utils::{ClientFixtures, FailingStore};

async fn seeded_tools() -> KycTools {
    let store = Arc::new(InMemoryKycStore::new());
    let clients = ClientService::new(store.clone(), store);
    for request in [
        ClientFixtures::company("ABC Corp", RiskLevel::High),
        ClientFixtures::company("xabcx", RiskLevel::Low),
        ClientFixtures::company("Other", RiskLevel::High),
    ] {
        clients.create_client(request).await.unwrap();
    }
    KycTools::new(clients)
}

fn failing_tools() -> KycTools {
    let store = Arc::new(FailingStore::new("connection refused"));
    KycTools::new(ClientService::new(store.clone(), store))
}

mod tool_adapter {
    use super::*;

    #[tokio::test]
    async fn test_search_by_name_fragment() {
        let tools = seeded_tools().await;

        let ToolResponse::SearchClients(result) = tools.search_clients(Some("abc"), None).await
        else {
            panic!("expected a success envelope");
        };
        assert!(result.success);
        assert_eq!(result.count, 2);
        assert_eq!(result.clients.len(), 2);
        assert_eq!(result.search_criteria.name, "abc");
        assert_eq!(result.search_criteria.risk_level, "any");
    }

    #[tokio::test]
    async fn test_absent_criteria_render_as_any() {
        let tools = seeded_tools().await;

        let value = tools.search_clients(None, Some(RiskLevel::High)).await.to_value();
        assert_eq!(value["count"], json!(2));
        assert_eq!(value["searchCriteria"], json!({ "name": "any", "riskLevel": "HIGH" }));
        assert_eq!(value["message"], json!("Found 2 clients matching search criteria"));
    }

    #[tokio::test]
    async fn test_storage_failure_becomes_failure_envelope() {
        let tools = failing_tools();

        let response = tools.search_clients(Some("abc"), None).await;
        assert!(!response.is_success());
        let value = response.to_value();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["tool"], json!(SEARCH_CLIENTS));
        assert!(value["error"].as_str().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_call_parses_loose_arguments() {
        let tools = seeded_tools().await;

        let response = tools
            .call(SEARCH_CLIENTS, json!({ "name": null, "riskLevel": "high" }))
            .await;
        assert_eq!(response.to_value()["count"], json!(2));

        let response = tools.call(SEARCH_CLIENTS, Value::Null).await;
        assert_eq!(response.to_value()["count"], json!(3));
    }

    #[tokio::test]
    async fn test_call_rejects_bad_input_without_error() {
        let tools = seeded_tools().await;

        let bad_level = tools
            .call(SEARCH_CLIENTS, json!({ "riskLevel": "EXTREME" }))
            .await;
        assert!(!bad_level.is_success());
        assert!(bad_level.to_value()["error"]
            .as_str()
            .unwrap()
            .contains("EXTREME"));

        let unknown = tools.call("delete_everything", json!({})).await;
        assert!(!unknown.is_success());
        assert_eq!(unknown.to_value()["tool"], json!("delete_everything"));
    }
}

mod json_rpc {
    use super::*;

    async fn rpc(server: &McpServer, request: Value) -> Value {
        let response = server.handle(&request.to_string()).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_and_list_tools() {
        let server = McpServer::new(seeded_tools().await);

        let init = rpc(
            &server,
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
        )
        .await;
        assert_eq!(init["id"], json!(1));
        assert_eq!(init["result"]["serverInfo"]["name"], json!("kyc-mcp"));
        assert!(init["result"]["capabilities"]["tools"].is_object());

        let list = rpc(&server, json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" })).await;
        let tools = list["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], json!("search_clients"));
        assert_eq!(
            tools[0]["inputSchema"]["properties"]["riskLevel"]["enum"],
            json!(["LOW", "MEDIUM", "HIGH"])
        );
    }

    #[tokio::test]
    async fn test_tools_call_wraps_envelope_as_text() {
        let server = McpServer::new(seeded_tools().await);

        let response = rpc(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": "call-1",
                "method": "tools/call",
                "params": { "name": "search_clients", "arguments": { "name": "ABC" } }
            }),
        )
        .await;

        let result = &response["result"];
        assert_eq!(result["isError"], json!(false));
        let text = result["content"][0]["text"].as_str().unwrap();
        let envelope: Value = serde_json::from_str(text).unwrap();
        assert_eq!(envelope["count"], json!(2));
    }

    #[tokio::test]
    async fn test_tools_call_failure_sets_is_error() {
        let server = McpServer::new(failing_tools());

        let response = rpc(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "tools/call",
                "params": { "name": "search_clients", "arguments": {} }
            }),
        )
        .await;
        assert_eq!(response["result"]["isError"], json!(true));
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let server = McpServer::new(seeded_tools().await);

        let message = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
        assert!(server.handle(&message.to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_null_id_still_gets_response() {
        let server = McpServer::new(seeded_tools().await);

        let response = rpc(&server, json!({ "jsonrpc": "2.0", "id": null, "method": "tools/list" })).await;
        assert_eq!(response["id"], Value::Null);
        assert!(response.as_object().unwrap().contains_key("id"));
        assert!(response["result"]["tools"].is_array());
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let server = McpServer::new(seeded_tools().await);

        let parse = server.handle("{not json").await.unwrap();
        assert_eq!(parse.error.unwrap().code, -32700);

        let unknown = rpc(&server, json!({ "jsonrpc": "2.0", "id": 3, "method": "resources/list" })).await;
        assert_eq!(unknown["error"]["code"], json!(-32601));
    }

    #[tokio::test]
    async fn test_serve_writes_one_line_per_request() {
        let server = McpServer::new(seeded_tools().await);
        let input = [
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" }).to_string(),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string(),
            String::new(),
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }).to_string(),
        ]
        .join("\n");

        let mut output = Vec::new();
        server
            .serve(tokio::io::BufReader::new(input.as_bytes()), &mut output)
            .await
            .unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], json!(1));
        assert_eq!(lines[1]["id"], json!(2));
    }
}

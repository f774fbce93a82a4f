//! In-process MCP server for exercising the client over an in-memory pipe.

use crate::mcp::{McpClient, McpServerConfig};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam,
    ProtocolVersion, ServerCapabilities, ServerInfo, Tool, ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler, ServiceExt};
use serde_json::{json, Value};
use std::future::Future;

/// Offers `search_flights`, `sold_out`, and a tool without a name.
pub struct FlightServer;

fn tool(value: Value) -> Tool {
    serde_json::from_value(value).unwrap()
}

fn call_result(value: Value) -> CallToolResult {
    serde_json::from_value(value).unwrap()
}

impl ServerHandler for FlightServer {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        let tools = vec![
            tool(json!({
                "name": "search_flights",
                "description": "Search flights between two airports",
                "inputSchema": {
                    "type": "object",
                    "properties": {"from": {"type": "string"}, "to": {"type": "string"}},
                    "required": ["from", "to"]
                }
            })),
            tool(json!({
                "name": "sold_out",
                "description": "Always reports no availability",
                "inputSchema": {"type": "object"}
            })),
            tool(json!({"name": "", "inputSchema": {"type": "object"}})),
        ];
        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        let raw = serde_json::to_value(&request).unwrap();
        let outcome = match raw["name"].as_str().unwrap_or_default() {
            "search_flights" => Ok(call_result(json!({
                "content": [
                    {"type": "text", "text": format!(
                        "EK650 {}-{} $320",
                        raw["arguments"]["from"].as_str().unwrap_or("?"),
                        raw["arguments"]["to"].as_str().unwrap_or("?")
                    )},
                    {"type": "text", "text": "2 results"}
                ]
            }))),
            "sold_out" => Ok(call_result(json!({
                "content": [{"type": "text", "text": "No availability"}],
                "isError": true
            }))),
            other => Err(ErrorData::invalid_params(format!("unknown tool {}", other), None)),
        };
        std::future::ready(outcome)
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
                ..Default::default()
            },
            server_info: Implementation::from_build_env(),
            instructions: None,
        }
    }
}

/// Start a `FlightServer` task and connect a client to it.
pub async fn connect_to_flight_server() -> McpClient {
    let (client_io, server_io) = tokio::io::duplex(64 * 1024);

    tokio::spawn(async move {
        let running = FlightServer.serve(tokio::io::split(server_io)).await.unwrap();
        let _ = running.waiting().await;
    });

    let service = ().serve(tokio::io::split(client_io)).await.unwrap();
    McpClient::from_service(McpServerConfig::new("flights", "in-process"), service)
        .await
        .unwrap()
}

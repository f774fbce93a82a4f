use crate::error::{Result, TravelAgentError};
use crate::llm::{LlmTool, ToolDescriptor};
use async_trait::async_trait;
use rmcp::model::{CallToolRequestParam, CallToolResult, Tool};
use rmcp::service::ServerSink;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// A tool offered by an MCP server, callable by the agent.
///
/// Every tool keeps a handle to the session of the server that listed it.
pub struct McpTool {
    descriptor: ToolDescriptor,
    sink: ServerSink,
}

impl McpTool {
    pub fn new(tool: &Tool, sink: ServerSink) -> Result<Self> {
        Ok(Self {
            descriptor: descriptor_for(tool)?,
            sink,
        })
    }

    pub fn name(&self) -> &str {
        &self.descriptor.function.name
    }

    pub fn description(&self) -> &str {
        &self.descriptor.function.description
    }
}

#[async_trait]
impl LlmTool for McpTool {
    async fn run(&self, args: &HashMap<String, Value>) -> Result<Value> {
        debug!(tool = self.name(), "Calling MCP tool");

        let params = call_params(self.name(), args)?;
        let result = self
            .sink
            .call_tool(params)
            .await
            .map_err(|e| TravelAgentError::McpError(format!("{} failed: {}", self.name(), e)))?;

        flatten_result(&result)
    }

    fn descriptor(&self) -> ToolDescriptor {
        self.descriptor.clone()
    }
}

/// Build the `tools/call` parameters for `name` with the model's arguments.
pub fn call_params(name: &str, args: &HashMap<String, Value>) -> Result<CallToolRequestParam> {
    let arguments: Map<String, Value> = args.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    Ok(serde_json::from_value(json!({
        "name": name,
        "arguments": arguments,
    }))?)
}

/// Describe an MCP tool as a function tool for the model.
///
/// MCP input schemas are already JSON Schema objects, so they pass through
/// untouched; a missing schema becomes an empty object schema.
pub fn descriptor_for(tool: &Tool) -> Result<ToolDescriptor> {
    let raw = serde_json::to_value(tool)?;

    let name = raw["name"]
        .as_str()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| TravelAgentError::McpError("Tool without a name".to_string()))?;
    let description = raw["description"].as_str().unwrap_or_default();
    let parameters = match raw.get("inputSchema") {
        Some(schema @ Value::Object(_)) => schema.clone(),
        _ => json!({"type": "object", "properties": {}}),
    };

    Ok(ToolDescriptor::function(name, description, parameters))
}

/// Collapse a tool result into the text the model will read.
///
/// Text blocks are joined with newlines; embedded text resources contribute
/// their text; other blocks are summarised. A result without content falls
/// back to its structured payload. Results flagged as errors become
/// `ToolError`.
pub fn flatten_result(result: &CallToolResult) -> Result<Value> {
    let raw = serde_json::to_value(result)?;

    let mut parts = Vec::new();
    if let Some(blocks) = raw["content"].as_array() {
        for block in blocks {
            match block["type"].as_str() {
                Some("text") => parts.push(block["text"].as_str().unwrap_or_default().to_string()),
                Some("resource") => match block["resource"]["text"].as_str() {
                    Some(text) => parts.push(text.to_string()),
                    None => parts.push(format!(
                        "[resource: {}]",
                        block["resource"]["uri"].as_str().unwrap_or("unknown")
                    )),
                },
                Some(other) => parts.push(format!(
                    "[{}: {}]",
                    other,
                    block["mimeType"].as_str().unwrap_or("unknown")
                )),
                None => {}
            }
        }
    }

    let text = if parts.is_empty() {
        match raw.get("structuredContent") {
            Some(structured) if !structured.is_null() => structured.to_string(),
            _ => String::new(),
        }
    } else {
        parts.join("\n")
    };

    if raw["isError"].as_bool().unwrap_or(false) {
        return Err(TravelAgentError::ToolError(text));
    }

    Ok(Value::String(text))
}

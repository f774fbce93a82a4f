use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Descriptor for tool function parameters
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDescriptor {
    pub r#type: String,
    pub function: FunctionDescriptor,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDescriptor {
    /// Describe a function tool
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            r#type: "function".to_string(),
            function: FunctionDescriptor {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

/// Trait for LLM tools
///
/// Tools run asynchronously since most of them talk to another process
/// (an MCP server) rather than computing locally.
#[async_trait]
pub trait LlmTool: Send + Sync {
    /// Execute the tool with given arguments
    async fn run(&self, args: &HashMap<String, Value>) -> Result<Value>;

    /// Get tool descriptor for LLM
    fn descriptor(&self) -> ToolDescriptor;

    /// Check if this tool matches the given name
    fn matches(&self, name: &str) -> bool {
        self.descriptor().function.name == name
    }
}

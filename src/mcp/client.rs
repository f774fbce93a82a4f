use crate::error::{Result, TravelAgentError};
use crate::llm::LlmTool;
use crate::mcp::config::McpServerConfig;
use crate::mcp::tool::McpTool;
use rmcp::model::Tool;
use rmcp::service::{RunningService, ServerSink};
use rmcp::transport::TokioChildProcess;
use rmcp::{RoleClient, ServiceExt};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// A connection to one MCP server running as a child process.
///
/// # Examples
///
/// ```ignore
/// use travel_planner::mcp::{McpClient, McpServerConfig};
///
/// let client = McpClient::connect(McpServerConfig::bright_data(token)).await?;
/// println!("Tools: {:?}", client.tool_names());
/// client.shutdown().await;
/// ```
pub struct McpClient {
    config: McpServerConfig,
    sink: ServerSink,
    tools: Vec<Tool>,
    service: Option<RunningService<RoleClient, ()>>,
}

impl McpClient {
    /// Spawn the server, complete the MCP handshake and list its tools.
    pub async fn connect(config: McpServerConfig) -> Result<Self> {
        info!(server = %config.name, command = %config.command_line(), "Starting MCP server");

        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args);
        for (key, value) in &config.env {
            cmd.env(key, value);
        }

        let transport = TokioChildProcess::new(cmd).map_err(|e| {
            TravelAgentError::McpError(format!(
                "Failed to spawn `{}`: {}",
                config.command_line(),
                e
            ))
        })?;

        let service = ().serve(transport).await.map_err(|e| {
            TravelAgentError::McpError(format!("Handshake with {} failed: {}", config.name, e))
        })?;

        Self::from_service(config, service).await
    }

    /// Take over an initialized session and list the server's tools.
    pub async fn from_service(
        config: McpServerConfig,
        service: RunningService<RoleClient, ()>,
    ) -> Result<Self> {
        let sink = service.peer().clone();
        let tools = sink.list_all_tools().await.map_err(|e| {
            TravelAgentError::McpError(format!("Listing tools of {} failed: {}", config.name, e))
        })?;

        debug!(server = %config.name, count = tools.len(), "Discovered MCP tools");

        Ok(Self {
            config,
            sink,
            tools,
            service: Some(service),
        })
    }

    pub fn server_name(&self) -> &str {
        &self.config.name
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_ref()).collect()
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Wrap every discovered tool for use by the agent.
    ///
    /// Tools the model could not be told about (no name) are skipped.
    pub fn tools(&self) -> Vec<Box<dyn LlmTool>> {
        self.tools
            .iter()
            .filter_map(|tool| match McpTool::new(tool, self.sink.clone()) {
                Ok(mcp_tool) => Some(Box::new(mcp_tool) as Box<dyn LlmTool>),
                Err(e) => {
                    warn!(server = %self.config.name, error = %e, "Skipping MCP tool");
                    None
                }
            })
            .collect()
    }

    /// Handle for issuing requests to the server.
    pub fn sink(&self) -> &ServerSink {
        &self.sink
    }

    pub fn is_connected(&self) -> bool {
        self.service.is_some()
    }

    /// Close the session and wait for the server process to go away.
    pub async fn shutdown(&mut self) {
        if let Some(service) = self.service.take() {
            match service.cancel().await {
                Ok(reason) => debug!(server = %self.config.name, ?reason, "MCP session closed"),
                Err(e) => warn!(server = %self.config.name, error = %e, "MCP session did not close cleanly"),
            }
        }
    }
}

//! Error types and result aliases for the travel planner.
//!
//! Every fallible operation in the library returns [`Result<T>`], carrying a
//! [`TravelAgentError`]. The binary folds these into `anyhow` at the top level.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TravelAgentError {
    #[error("LLM gateway error: {0}")]
    GatewayError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Tool error: {0}")]
    ToolError(String),

    #[error("MCP error: {0}")]
    McpError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Agent error: {0}")]
    AgentError(String),
}

pub type Result<T> = std::result::Result<T, TravelAgentError>;

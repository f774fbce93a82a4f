pub mod agents;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod mcp;
pub mod prompts;

pub use error::{Result, TravelAgentError};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::agents::{ChatSession, ReactAgent, TravelPlanningAgent};
    pub use crate::config::TravelAgentConfig;
    pub use crate::error::{Result, TravelAgentError};
    pub use crate::llm::gateways::OpenAIGateway;
    pub use crate::llm::{CompletionConfig, LlmBroker, LlmGateway, LlmMessage, LlmTool, MessageRole};
    pub use crate::mcp::{McpClient, McpServerConfig};
}

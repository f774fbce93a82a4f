//! Runtime configuration, gathered from the environment.
//!
//! Values come from the process environment after `.env` has been loaded;
//! command line flags are applied on top by the binary.

use crate::agents::chat_session::DEFAULT_MAX_CONTEXT;
use crate::agents::react_agent::DEFAULT_MAX_STEPS;
use crate::error::{Result, TravelAgentError};
use crate::llm::gateways::openai::GROQ_BASE_URL;
use crate::llm::gateways::OpenAIConfig;
use crate::mcp::McpServerConfig;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
/// Upper bound on a single LLM request, including the response body
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";
pub const GROQ_API_ENDPOINT_VAR: &str = "GROQ_API_ENDPOINT";
pub const BRIGHT_DATA_API_VAR: &str = "BRIGHT_DATA_API";

#[derive(Debug, Clone)]
pub struct TravelAgentConfig {
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub request_timeout: Duration,
    /// Model calls allowed per turn
    pub max_steps: usize,
    /// History budget in tokens
    pub max_context: usize,
    pub mcp_server: McpServerConfig,
}

impl TravelAgentConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_api_key = non_empty(GROQ_API_KEY_VAR).ok_or_else(|| {
            TravelAgentError::ConfigError(format!("{} is not set", GROQ_API_KEY_VAR))
        })?;

        let bright_data_token = non_empty(BRIGHT_DATA_API_VAR);
        if bright_data_token.is_none() {
            warn!("{} is not set; the BrightData MCP server will reject requests", BRIGHT_DATA_API_VAR);
        }

        Ok(Self {
            llm_api_key,
            llm_base_url: non_empty(GROQ_API_ENDPOINT_VAR)
                .unwrap_or_else(|| GROQ_BASE_URL.to_string()),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_steps: DEFAULT_MAX_STEPS,
            max_context: DEFAULT_MAX_CONTEXT,
            mcp_server: McpServerConfig::bright_data(bright_data_token),
        })
    }

    pub fn openai_config(&self) -> OpenAIConfig {
        OpenAIConfig {
            timeout: Some(self.request_timeout),
            ..OpenAIConfig::new(&self.llm_api_key, &self.llm_base_url)
        }
    }
}

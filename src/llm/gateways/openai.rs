//! Gateway for OpenAI-compatible chat-completion APIs.
//!
//! The travel planner talks to Groq, which serves the OpenAI wire format under
//! `https://api.groq.com/openai/v1`. Any other compatible endpoint works by
//! changing the base URL.

use crate::error::{Result, TravelAgentError};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::gateways::openai_messages_adapter::{adapt_messages_to_openai, convert_tool_calls};
use crate::llm::models::{LlmGatewayResponse, LlmMessage};
use crate::llm::tools::LlmTool;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Configuration for connecting to an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: None,
        }
    }
}

/// Gateway for OpenAI-compatible LLM services.
pub struct OpenAIGateway {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIGateway {
    /// Create a new gateway with custom configuration.
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        Ok(Self { client, config })
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key, base_url))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn build_request_body(
        model: &str,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<Value> {
        let mut body = serde_json::json!({
            "model": model,
            "messages": adapt_messages_to_openai(messages)?,
            "temperature": config.temperature,
            "max_tokens": config.max_tokens,
        });

        if let Some(tools) = tools.filter(|t| !t.is_empty()) {
            let tool_defs: Vec<_> = tools.iter().map(|t| t.descriptor()).collect();
            body["tools"] = serde_json::to_value(tool_defs)?;
        }

        Ok(body)
    }
}

#[async_trait]
impl LlmGateway for OpenAIGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse> {
        info!("Delegating to OpenAI-compatible API for completion");
        debug!(
            "Model: {}, Message count: {}, Tool count: {}",
            model,
            messages.len(),
            tools.map_or(0, |t| t.len())
        );

        let body = Self::build_request_body(model, messages, tools, config)?;

        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TravelAgentError::GatewayError(format!(
                "API error: {} - {}",
                status, error_text
            )));
        }

        let response_body: Value = response.json().await?;
        let message = &response_body["choices"][0]["message"];

        if message.is_null() {
            return Err(TravelAgentError::ApiError(
                "Response contained no choices".to_string(),
            ));
        }

        let content = message["content"].as_str().map(String::from);
        let tool_calls = message["tool_calls"]
            .as_array()
            .map(|calls| convert_tool_calls(calls))
            .unwrap_or_default();

        Ok(LlmGatewayResponse {
            content,
            tool_calls,
        })
    }

    async fn get_available_models(&self) -> Result<Vec<String>> {
        debug!("Fetching available models");

        let response = self
            .client
            .get(self.endpoint("models"))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TravelAgentError::GatewayError(format!(
                "Failed to get models: {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;

        let mut models = body["data"]
            .as_array()
            .ok_or_else(|| TravelAgentError::ApiError("Invalid response format".to_string()))?
            .iter()
            .filter_map(|m| m["id"].as_str().map(String::from))
            .collect::<Vec<_>>();

        models.sort();
        Ok(models)
    }
}

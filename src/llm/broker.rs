use crate::error::{Result, TravelAgentError};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::{LlmGatewayResponse, LlmMessage, LlmToolCall};
use crate::llm::tools::LlmTool;
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main interface for LLM interactions
///
/// The broker pairs a model name with a gateway and runs the tool-calling
/// loop: ask the model, execute whatever tools it requests, feed the results
/// back, and repeat until it answers in plain text.
pub struct LlmBroker {
    model: String,
    gateway: Arc<dyn LlmGateway>,
}

impl LlmBroker {
    /// Create a new LLM broker
    pub fn new(model: impl Into<String>, gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            model: model.into(),
            gateway,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Make a single model call without running any tools
    pub async fn complete(
        &self,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse> {
        self.gateway.complete(&self.model, messages, tools, config).await
    }

    /// Run the tool-calling loop and return the whole conversation.
    ///
    /// The returned list starts with `messages`, followed by every assistant
    /// tool request and tool result produced along the way, and ends with the
    /// final assistant answer. At most `max_steps` model calls are made.
    pub async fn generate(
        &self,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: Option<CompletionConfig>,
        max_steps: usize,
    ) -> Result<Vec<LlmMessage>> {
        let config = config.unwrap_or_default();
        let mut current_messages = messages.to_vec();

        for step in 1..=max_steps {
            debug!(step, messages = current_messages.len(), "Calling model");
            let response = self.complete(&current_messages, tools, &config).await?;

            if response.tool_calls.is_empty() {
                current_messages.push(LlmMessage::assistant(response.content.unwrap_or_default()));
                return Ok(current_messages);
            }

            let Some(tools) = tools else {
                warn!("LLM requested tool calls but no tools provided");
                current_messages.push(LlmMessage::assistant(response.content.unwrap_or_default()));
                return Ok(current_messages);
            };

            info!("Tool calls requested: {}", response.tool_calls.len());
            let results = Self::execute_tool_calls(&response.tool_calls, tools).await;

            current_messages
                .push(LlmMessage::assistant_tool_calls(response.content, response.tool_calls));
            current_messages.extend(results);
        }

        Err(TravelAgentError::AgentError(format!(
            "Step limit of {} model calls reached without a final answer",
            max_steps
        )))
    }

    /// Run every requested tool concurrently.
    ///
    /// Returns one tool message per call, in call order. Failures are reported
    /// to the model as the tool's output instead of aborting the turn.
    pub async fn execute_tool_calls(
        tool_calls: &[LlmToolCall],
        tools: &[Box<dyn LlmTool>],
    ) -> Vec<LlmMessage> {
        let runs = tool_calls.iter().map(|tool_call| async move {
            let content = match tools.iter().find(|t| t.matches(&tool_call.name)) {
                Some(tool) => {
                    info!("Executing tool: {}", tool_call.name);
                    match tool.run(&tool_call.arguments).await {
                        Ok(output) => render_tool_output(output),
                        Err(e) => {
                            warn!(tool = %tool_call.name, error = %e, "Tool execution failed");
                            format!("Error: {}\n Please fix your mistakes.", e)
                        }
                    }
                }
                None => {
                    warn!("Tool not found: {}", tool_call.name);
                    let names: Vec<String> =
                        tools.iter().map(|t| t.descriptor().function.name).collect();
                    format!(
                        "Error: {} is not a valid tool, try one of [{}].",
                        tool_call.name,
                        names.join(", ")
                    )
                }
            };

            LlmMessage::tool_result(tool_call, content)
        });

        join_all(runs).await
    }
}

fn render_tool_output(output: Value) -> String {
    match output {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

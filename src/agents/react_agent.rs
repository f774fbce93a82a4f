//! A reason-and-act agent: a broker bundled with its tools and limits.
//!
//! Each invocation takes the full conversation, lets the model call tools as
//! many times as it needs (up to the step limit) and returns the conversation
//! extended with everything that happened. The last message is the answer.

use crate::error::{Result, TravelAgentError};
use crate::llm::{CompletionConfig, LlmBroker, LlmMessage, LlmTool, MessageRole};

/// Default number of model calls allowed per invocation
pub const DEFAULT_MAX_STEPS: usize = 25;

pub struct ReactAgent {
    broker: LlmBroker,
    tools: Vec<Box<dyn LlmTool>>,
    config: CompletionConfig,
    max_steps: usize,
}

impl ReactAgent {
    pub fn new(broker: LlmBroker, tools: Vec<Box<dyn LlmTool>>) -> Self {
        Self::builder(broker).tools(tools).build()
    }

    pub fn builder(broker: LlmBroker) -> ReactAgentBuilder {
        ReactAgentBuilder::new(broker)
    }

    /// Run the agent over `messages` and return the extended conversation.
    pub async fn invoke(&self, messages: &[LlmMessage]) -> Result<Vec<LlmMessage>> {
        let tools = if self.tools.is_empty() {
            None
        } else {
            Some(self.tools.as_slice())
        };

        self.broker
            .generate(messages, tools, Some(self.config.clone()), self.max_steps)
            .await
    }

    /// Run the agent and return only its final answer.
    pub async fn respond(&self, messages: &[LlmMessage]) -> Result<LlmMessage> {
        let mut conversation = self.invoke(messages).await?;
        match conversation.pop() {
            Some(last) if last.role == MessageRole::Assistant => Ok(last),
            _ => Err(TravelAgentError::AgentError(
                "Agent finished without an assistant message".to_string(),
            )),
        }
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.descriptor().function.name).collect()
    }

    pub fn model(&self) -> &str {
        self.broker.model()
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }
}

/// Builder for constructing a `ReactAgent` with custom configuration.
pub struct ReactAgentBuilder {
    broker: LlmBroker,
    tools: Vec<Box<dyn LlmTool>>,
    config: CompletionConfig,
    max_steps: usize,
}

impl ReactAgentBuilder {
    fn new(broker: LlmBroker) -> Self {
        Self {
            broker,
            tools: Vec::new(),
            config: CompletionConfig::default(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn tools(mut self, tools: Vec<Box<dyn LlmTool>>) -> Self {
        self.tools = tools;
        self
    }

    /// Set the sampling temperature (default: 1.0)
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the maximum model calls per invocation (default: 25)
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn build(self) -> ReactAgent {
        ReactAgent {
            broker: self.broker,
            tools: self.tools,
            config: self.config,
            max_steps: self.max_steps,
        }
    }
}

//! Conversation history across terminal turns.
//!
//! A chat session keeps the system prompt, every user message and every final
//! assistant answer, and hands the whole history to the agent on each turn.
//! Intermediate tool traffic stays inside the agent invocation. When the
//! history outgrows the token budget the oldest messages after the system
//! prompt are dropped.

use crate::agents::react_agent::ReactAgent;
use crate::error::Result;
use crate::llm::gateways::TokenizerGateway;
use crate::llm::{LlmMessage, MessageRole};
use std::sync::Arc;
use tracing::debug;

/// Default token budget, the context window of `openai/gpt-oss-120b`
pub const DEFAULT_MAX_CONTEXT: usize = 131_072;

/// An LLM message with token count metadata.
#[derive(Debug, Clone)]
pub struct SizedLlmMessage {
    pub message: LlmMessage,
    pub token_length: usize,
}

impl SizedLlmMessage {
    pub fn new(message: LlmMessage, token_length: usize) -> Self {
        Self {
            message,
            token_length,
        }
    }

    pub fn role(&self) -> MessageRole {
        self.message.role
    }

    pub fn content(&self) -> Option<&str> {
        self.message.content.as_deref()
    }
}

pub struct ChatSession {
    agent: Arc<ReactAgent>,
    messages: Vec<SizedLlmMessage>,
    max_context: usize,
    tokenizer_gateway: TokenizerGateway,
}

impl ChatSession {
    pub fn builder(agent: Arc<ReactAgent>) -> ChatSessionBuilder {
        ChatSessionBuilder::new(agent)
    }

    /// Send a user message and return the agent's answer.
    ///
    /// The user message is recorded before the agent runs and stays in the
    /// history even when the agent fails; the answer is recorded only on
    /// success.
    pub async fn send(&mut self, query: &str) -> Result<String> {
        self.insert_message(LlmMessage::user(query));

        let history: Vec<LlmMessage> = self.messages.iter().map(|m| m.message.clone()).collect();
        let reply = self.agent.respond(&history).await?;
        let content = reply.content.clone().unwrap_or_default();

        self.insert_message(reply);

        Ok(content)
    }

    /// Append a message, trimming the oldest non-system messages while the
    /// history is over budget. The system prompt and the newest message are
    /// always kept, even if together they exceed the budget.
    pub fn insert_message(&mut self, message: LlmMessage) {
        let token_length = message
            .content
            .as_deref()
            .map_or(0, |content| self.tokenizer_gateway.count_tokens(content));
        self.messages.push(SizedLlmMessage::new(message, token_length));

        let mut total_length = self.total_tokens();

        while total_length > self.max_context && self.messages.len() > 2 {
            // Index 0 is the system prompt
            let removed = self.messages.remove(1);
            total_length -= removed.token_length;
            debug!(tokens = removed.token_length, "Dropped oldest message from history");
        }
    }

    pub fn messages(&self) -> &[SizedLlmMessage] {
        &self.messages
    }

    pub fn total_tokens(&self) -> usize {
        self.messages.iter().map(|m| m.token_length).sum()
    }
}

/// Builder for constructing a `ChatSession` with custom configuration.
pub struct ChatSessionBuilder {
    agent: Arc<ReactAgent>,
    system_prompt: String,
    max_context: usize,
    tokenizer_gateway: Option<TokenizerGateway>,
}

impl ChatSessionBuilder {
    fn new(agent: Arc<ReactAgent>) -> Self {
        Self {
            agent,
            system_prompt: "You are a helpful assistant.".to_string(),
            max_context: DEFAULT_MAX_CONTEXT,
            tokenizer_gateway: None,
        }
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set the maximum history size in tokens (default: 131072)
    pub fn max_context(mut self, max_context: usize) -> Self {
        self.max_context = max_context;
        self
    }

    pub fn tokenizer_gateway(mut self, gateway: TokenizerGateway) -> Self {
        self.tokenizer_gateway = Some(gateway);
        self
    }

    pub fn build(self) -> ChatSession {
        let tokenizer_gateway = self.tokenizer_gateway.unwrap_or_default();
        let token_length = tokenizer_gateway.count_tokens(&self.system_prompt);

        ChatSession {
            agent: self.agent,
            messages: vec![SizedLlmMessage::new(
                LlmMessage::system(self.system_prompt),
                token_length,
            )],
            max_context: self.max_context,
            tokenizer_gateway,
        }
    }
}

pub mod openai;
pub mod openai_messages_adapter;
pub mod tokenizer_gateway;

pub use openai::{OpenAIConfig, OpenAIGateway};
pub use tokenizer_gateway::TokenizerGateway;

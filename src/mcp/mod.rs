//! Model Context Protocol client.
//!
//! The travel planner launches a scraping server as a child process, speaks
//! MCP to it over stdin/stdout through `rmcp`, and exposes the server's tools
//! to the agent as ordinary [`LlmTool`](crate::llm::LlmTool)s.

mod client;
mod config;
mod tool;

pub use client::McpClient;
pub use config::McpServerConfig;
pub use tool::{call_params, descriptor_for, flatten_result, McpTool};

#[cfg(test)]
mod test_server;

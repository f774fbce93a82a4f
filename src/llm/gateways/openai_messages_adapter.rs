//! Adapter between internal messages and the OpenAI chat-completions wire format.
//!
//! Groq, and every other OpenAI-compatible provider, accepts the same shape.

use crate::error::Result;
use crate::llm::models::{LlmMessage, LlmToolCall, MessageRole};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::warn;

/// Adapt LLM messages to OpenAI format.
pub fn adapt_messages_to_openai(messages: &[LlmMessage]) -> Result<Vec<Value>> {
    let mut result = Vec::with_capacity(messages.len());

    for msg in messages {
        let openai_msg = match msg.role {
            MessageRole::System => json!({
                "role": "system",
                "content": msg.content.as_deref().unwrap_or("")
            }),
            MessageRole::User => json!({
                "role": "user",
                "content": msg.content.as_deref().unwrap_or("")
            }),
            MessageRole::Assistant => {
                let mut assistant_msg = json!({ "role": "assistant" });

                if let Some(ref content) = msg.content {
                    assistant_msg["content"] = json!(content);
                }

                if let Some(ref tool_calls) = msg.tool_calls {
                    let mut formatted_calls = Vec::with_capacity(tool_calls.len());
                    for tc in tool_calls {
                        formatted_calls.push(json!({
                            "id": tc.id.as_deref().unwrap_or(""),
                            "type": "function",
                            "function": {
                                "name": tc.name,
                                "arguments": serde_json::to_string(&tc.arguments)?
                            }
                        }));
                    }
                    assistant_msg["tool_calls"] = Value::Array(formatted_calls);
                }

                assistant_msg
            }
            MessageRole::Tool => {
                // Tool messages answer exactly one call
                let tool_call_id = msg
                    .tool_calls
                    .as_ref()
                    .and_then(|tcs| tcs.first())
                    .and_then(|tc| tc.id.clone())
                    .unwrap_or_default();

                json!({
                    "role": "tool",
                    "content": msg.content.as_deref().unwrap_or(""),
                    "tool_call_id": tool_call_id
                })
            }
        };

        result.push(openai_msg);
    }

    Ok(result)
}

/// Convert tool calls from OpenAI format to internal format.
///
/// Calls without a function name are dropped. Calls without an id get a
/// generated one so their results can still be matched up.
pub fn convert_tool_calls(tool_calls: &[Value]) -> Vec<LlmToolCall> {
    tool_calls
        .iter()
        .filter_map(|tc| {
            let name = tc["function"]["name"].as_str()?.to_string();
            let id = tc["id"]
                .as_str()
                .filter(|id| !id.is_empty())
                .map(String::from)
                .unwrap_or_else(|| format!("call_{}", uuid::Uuid::new_v4().simple()));

            Some(LlmToolCall {
                id: Some(id),
                arguments: parse_arguments(&name, &tc["function"]["arguments"]),
                name,
            })
        })
        .collect()
}

fn parse_arguments(tool_name: &str, raw: &Value) -> HashMap<String, Value> {
    match raw {
        Value::String(s) if s.trim().is_empty() => HashMap::new(),
        Value::String(s) => serde_json::from_str(s).unwrap_or_else(|e| {
            warn!(tool = tool_name, error = %e, "Discarding unparseable tool arguments");
            HashMap::new()
        }),
        // Some providers send the arguments object inline
        Value::Object(map) => map.clone().into_iter().collect(),
        _ => HashMap::new(),
    }
}

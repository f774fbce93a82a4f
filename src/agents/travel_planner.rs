//! The travel planning assistant: wiring plus the terminal conversation.

use crate::agents::chat_session::ChatSession;
use crate::agents::react_agent::ReactAgent;
use crate::config::TravelAgentConfig;
use crate::error::Result;
use crate::llm::gateways::OpenAIGateway;
use crate::llm::{LlmBroker, LlmMessage};
use crate::mcp::McpClient;
use crate::prompts;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

const EXIT_COMMANDS: [&str; 3] = ["quit", "exit", "bye"];
const RULE_WIDTH: usize = 80;

pub struct TravelPlanningAgent {
    agent: Arc<ReactAgent>,
    client: Option<McpClient>,
    system_message: String,
    max_context: usize,
}

impl TravelPlanningAgent {
    /// Assemble a planner from an existing agent, without an MCP connection.
    pub fn new(agent: Arc<ReactAgent>, system_message: impl Into<String>, max_context: usize) -> Self {
        Self {
            agent,
            client: None,
            system_message: system_message.into(),
            max_context,
        }
    }

    /// Start the MCP server, discover its tools and build the agent.
    ///
    /// Progress goes to `out`; a failure is reported there too before it is
    /// returned.
    pub async fn initialize<W: Write>(config: &TravelAgentConfig, out: &mut W) -> Result<Self> {
        match Self::connect(config, out).await {
            Ok(planner) => Ok(planner),
            Err(e) => {
                writeln!(out, "Initialization error: {}", e)?;
                Err(e)
            }
        }
    }

    async fn connect<W: Write>(config: &TravelAgentConfig, out: &mut W) -> Result<Self> {
        let client = McpClient::connect(config.mcp_server.clone()).await?;
        let tools = client.tools();
        writeln!(out, "Loaded {} tools from BrightData MCP", tools.len())?;
        info!(server = client.server_name(), tools = ?client.tool_names(), "MCP tools loaded");

        let gateway = Arc::new(OpenAIGateway::with_config(config.openai_config())?);
        let agent = ReactAgent::builder(LlmBroker::new(&config.model, gateway))
            .tools(tools)
            .temperature(config.temperature)
            .max_steps(config.max_steps)
            .build();

        let mut planner = Self::new(
            Arc::new(agent),
            prompts::system_prompt_for_today(),
            config.max_context,
        );
        planner.client = Some(client);

        writeln!(out, "Travel Planning Agent initialized successfully\n")?;
        Ok(planner)
    }

    pub fn system_message(&self) -> &str {
        &self.system_message
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.agent.tool_names()
    }

    /// Answer a single request without conversation history.
    ///
    /// Agent failures are printed and returned as the response text; only a
    /// failure to write to `out` is an error.
    pub async fn plan_trip<W: Write>(&self, user_request: &str, out: &mut W) -> Result<String> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(out, "Processing request: {}\n", user_request)?;
        writeln!(out, "{}", rule)?;

        let messages = [LlmMessage::system(&self.system_message), LlmMessage::user(user_request)];

        match self.agent.respond(&messages).await {
            Ok(reply) => {
                let final_message = reply.content.unwrap_or_default();
                writeln!(out, "\n{}", rule)?;
                writeln!(out, "TRAVEL PLAN RESPONSE:")?;
                writeln!(out, "{}", rule)?;
                writeln!(out, "{}", final_message)?;
                writeln!(out, "{}\n", rule)?;
                Ok(final_message)
            }
            Err(e) => {
                let error_msg = format!("Error processing request: {}", e);
                writeln!(out, "{}", error_msg)?;
                Ok(error_msg)
            }
        }
    }

    /// Run the terminal conversation until the user leaves.
    ///
    /// Lines are read from `input` and everything is written to `out`. The
    /// session ends on an exit command, on end of input, or when `interrupt`
    /// resolves (Ctrl-C in the binary), whichever comes first.
    pub async fn interactive_mode<R, W, I>(&self, input: R, out: &mut W, interrupt: I) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        I: Future<Output = ()>,
    {
        self.print_banner(out)?;

        let mut session = ChatSession::builder(Arc::clone(&self.agent))
            .system_prompt(&self.system_message)
            .max_context(self.max_context)
            .build();
        let mut lines = input.lines();
        tokio::pin!(interrupt);

        loop {
            write!(out, "You: ")?;
            out.flush()?;

            let line = tokio::select! {
                biased;
                _ = &mut interrupt => return Self::print_interrupted(out),
                line = lines.next_line() => line?,
            };

            let Some(line) = line else {
                writeln!(out, "\n Safe travels! Goodbye!")?;
                return Ok(());
            };
            let user_input = line.trim();

            if is_exit_command(user_input) {
                writeln!(out, "\n Safe travels! Goodbye!")?;
                return Ok(());
            }

            if user_input.is_empty() {
                continue;
            }

            let reply = tokio::select! {
                biased;
                _ = &mut interrupt => return Self::print_interrupted(out),
                reply = session.send(user_input) => reply,
            };

            match reply {
                Ok(content) => {
                    writeln!(out, "\nAssistant: {}\n", content)?;
                    writeln!(out, "{}\n", "-".repeat(RULE_WIDTH))?;
                }
                Err(e) => writeln!(out, "\n✗ Error: {}\n", e)?,
            }
        }
    }

    /// Shut down the MCP server, if one was started.
    pub async fn cleanup(&mut self) {
        if let Some(client) = self.client.as_mut() {
            client.shutdown().await;
        }
    }

    fn print_banner<W: Write>(&self, out: &mut W) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(out, "\n{}", rule)?;
        writeln!(out, "TRAVEL PLANNING ASSISTANT")?;
        writeln!(out, "{}", rule)?;
        writeln!(out, "I can help you with:")?;
        writeln!(out, "  • Flight searches and comparisons")?;
        writeln!(out, "  • Hotel recommendations")?;
        writeln!(out, "  • Complete trip itineraries")?;
        writeln!(out, "  • Travel tips and local insights")?;
        writeln!(out, "\nType 'quit' or 'exit' to end the session")?;
        writeln!(out, "{}\n", rule)?;
        Ok(())
    }

    fn print_interrupted<W: Write>(out: &mut W) -> Result<()> {
        writeln!(out, "\n\nSession interrupted. Safe travels!")?;
        Ok(())
    }
}

fn is_exit_command(input: &str) -> bool {
    let lowered = input.to_lowercase();
    EXIT_COMMANDS.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TravelAgentError;
    use crate::llm::{
        CompletionConfig, LlmGateway, LlmGatewayResponse, LlmTool, LlmToolCall, MessageRole,
        ToolDescriptor,
    };
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::future::pending;
    use std::sync::Mutex;
    use tokio::io::BufReader;

    struct ScriptedGateway {
        responses: Mutex<Vec<Result<LlmGatewayResponse>>>,
        seen: Mutex<Vec<Vec<LlmMessage>>>,
    }

    impl ScriptedGateway {
        fn new(mut responses: Vec<Result<LlmGatewayResponse>>) -> Arc<Self> {
            responses.reverse();
            Arc::new(Self {
                responses: Mutex::new(responses),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn complete(
            &self,
            _model: &str,
            messages: &[LlmMessage],
            _tools: Option<&[Box<dyn LlmTool>]>,
            _config: &CompletionConfig,
        ) -> Result<LlmGatewayResponse> {
            self.seen.lock().unwrap().push(messages.to_vec());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(answer("default response")))
        }

        async fn get_available_models(&self) -> Result<Vec<String>> {
            Ok(vec![])
        }
    }

    struct FlightSearchTool;

    #[async_trait]
    impl LlmTool for FlightSearchTool {
        async fn run(&self, _args: &HashMap<String, Value>) -> Result<Value> {
            Ok(json!("EK650 DXB-CMB 1 Dec, $320"))
        }

        fn descriptor(&self) -> ToolDescriptor {
            ToolDescriptor::function("search_engine", "Search the web", json!({"type": "object"}))
        }
    }

    fn answer(text: &str) -> LlmGatewayResponse {
        LlmGatewayResponse {
            content: Some(text.to_string()),
            tool_calls: vec![],
        }
    }

    fn planner(gateway: Arc<ScriptedGateway>) -> TravelPlanningAgent {
        let agent = ReactAgent::builder(LlmBroker::new("openai/gpt-oss-120b", gateway))
            .tools(vec![Box::new(FlightSearchTool)])
            .temperature(0.3)
            .build();
        TravelPlanningAgent::new(Arc::new(agent), "You are a travel assistant.", 131_072)
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_exit_commands() {
        assert!(is_exit_command("quit"));
        assert!(is_exit_command("EXIT"));
        assert!(is_exit_command("Bye"));
        assert!(!is_exit_command("quit please"));
        assert!(!is_exit_command(""));
    }

    #[tokio::test]
    async fn test_plan_trip_prints_framed_response() {
        let gateway = ScriptedGateway::new(vec![
            Ok(LlmGatewayResponse {
                content: None,
                tool_calls: vec![LlmToolCall {
                    id: Some("call_1".to_string()),
                    name: "search_engine".to_string(),
                    arguments: HashMap::new(),
                }],
            }),
            Ok(answer("Take EK650 on December 1.")),
        ]);
        let planner = planner(gateway.clone());
        let mut out = Vec::new();

        let response = planner.plan_trip("Flights from Dubai to Colombo", &mut out).await.unwrap();

        assert_eq!(response, "Take EK650 on December 1.");
        let printed = output(out);
        assert!(printed.starts_with("Processing request: Flights from Dubai to Colombo\n"));
        assert!(printed.contains("TRAVEL PLAN RESPONSE:\n"));
        assert!(printed.contains(&format!("{}\nTake EK650 on December 1.\n", "=".repeat(80))));

        // One-shot requests start from the system prompt alone
        let seen = gateway.seen.lock().unwrap();
        assert_eq!(seen[0].len(), 2);
        assert_eq!(seen[0][0].role, MessageRole::System);
        assert_eq!(seen[1][3].content.as_deref(), Some("EK650 DXB-CMB 1 Dec, $320"));
    }

    #[tokio::test]
    async fn test_plan_trip_reports_errors() {
        let gateway = ScriptedGateway::new(vec![Err(TravelAgentError::GatewayError(
            "API error: 429".to_string(),
        ))]);
        let planner = planner(gateway);
        let mut out = Vec::new();

        let response = planner.plan_trip("Hotels in Paris", &mut out).await.unwrap();

        assert_eq!(response, "Error processing request: LLM gateway error: API error: 429");
        assert!(output(out).contains("Error processing request: LLM gateway error: API error: 429"));
    }

    #[tokio::test]
    async fn test_interactive_conversation() {
        let gateway = ScriptedGateway::new(vec![
            Ok(answer("Which dates?")),
            Ok(answer("Here are three hotels.")),
        ]);
        let planner = planner(gateway.clone());
        let input = "Hotels in Paris\n\n   \nApril 3 to 6\nQuit\nnever read\n".as_bytes();
        let mut out = Vec::new();

        planner.interactive_mode(input, &mut out, pending()).await.unwrap();

        let printed = output(out);
        assert!(printed.contains("TRAVEL PLANNING ASSISTANT"));
        assert!(printed.contains("\nAssistant: Which dates?\n"));
        assert!(printed.contains("\nAssistant: Here are three hotels.\n"));
        assert!(printed.ends_with("\n Safe travels! Goodbye!\n"));

        // Blank lines were skipped and history carried over between turns
        let seen = gateway.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].len(), 4);
        assert_eq!(seen[1][1].content.as_deref(), Some("Hotels in Paris"));
        assert_eq!(seen[1][2].content.as_deref(), Some("Which dates?"));
        assert_eq!(seen[1][3].content.as_deref(), Some("April 3 to 6"));
    }

    #[tokio::test]
    async fn test_interactive_error_does_not_end_session() {
        let gateway = ScriptedGateway::new(vec![
            Err(TravelAgentError::GatewayError("timeout".to_string())),
            Ok(answer("Back online.")),
        ]);
        let planner = planner(gateway.clone());
        let input = tokio_test::io::Builder::new()
            .read(b"first\n")
            .read(b"second\n")
            .read(b"bye\n")
            .build();
        let mut out = Vec::new();

        planner.interactive_mode(BufReader::new(input), &mut out, pending()).await.unwrap();

        let printed = output(out);
        assert!(printed.contains("\n✗ Error: LLM gateway error: timeout\n"));
        assert!(printed.contains("\nAssistant: Back online.\n"));

        // The failed user message stays in the history
        let seen = gateway.seen.lock().unwrap();
        assert_eq!(seen[1][1].content.as_deref(), Some("first"));
        assert_eq!(seen[1][2].content.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_interactive_end_of_input() {
        let planner = planner(ScriptedGateway::new(vec![]));
        let mut out = Vec::new();

        planner.interactive_mode("".as_bytes(), &mut out, pending()).await.unwrap();

        assert!(output(out).ends_with("You: \n Safe travels! Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_interactive_interrupt() {
        let gateway = ScriptedGateway::new(vec![]);
        let planner = planner(gateway.clone());
        let mut out = Vec::new();

        planner
            .interactive_mode("Hotels in Paris\n".as_bytes(), &mut out, async {})
            .await
            .unwrap();

        assert!(output(out).ends_with("\n\nSession interrupted. Safe travels!\n"));
        assert!(gateway.seen.lock().unwrap().is_empty());
    }

    struct StalledGateway {
        started: Arc<tokio::sync::Notify>,
    }

    #[async_trait]
    impl LlmGateway for StalledGateway {
        async fn complete(
            &self,
            _model: &str,
            _messages: &[LlmMessage],
            _tools: Option<&[Box<dyn LlmTool>]>,
            _config: &CompletionConfig,
        ) -> Result<LlmGatewayResponse> {
            self.started.notify_one();
            pending().await
        }

        async fn get_available_models(&self) -> Result<Vec<String>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_interactive_interrupt_during_turn() {
        let started = Arc::new(tokio::sync::Notify::new());
        let gateway = Arc::new(StalledGateway {
            started: started.clone(),
        });
        let agent = ReactAgent::builder(LlmBroker::new("openai/gpt-oss-120b", gateway)).build();
        let planner = TravelPlanningAgent::new(Arc::new(agent), "You are a travel assistant.", 131_072);
        let mut out = Vec::new();

        let interrupt = async move { started.notified().await };
        planner
            .interactive_mode("Flights from Dubai to Colombo
".as_bytes(), &mut out, interrupt)
            .await
            .unwrap();

        let printed = output(out);
        assert!(printed.contains("You: "));
        assert!(!printed.contains("Assistant:"));
        assert!(printed.ends_with("\n\nSession interrupted. Safe travels!\n"));
    }
}

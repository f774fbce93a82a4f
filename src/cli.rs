//! Command-line interface parsing.

use crate::config::TravelAgentConfig;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "travel-planner")]
#[command(about = "A terminal travel-planning assistant backed by live travel data")]
#[command(
    long_about = "Travel Planner answers flight, hotel and itinerary questions with an LLM \
that can search and scrape the web through the BrightData MCP server.\n\n\
Environment Variables (read from .env as well):\n\
  GROQ_API_KEY        API key for the LLM provider (required)\n\
  GROQ_API_ENDPOINT   OpenAI-compatible base URL (optional, defaults to https://api.groq.com/openai/v1)\n\
  BRIGHT_DATA_API     API token handed to the BrightData MCP server\n\
  RUST_LOG            Log filter for diagnostics on stderr (defaults to warn)\n\n\
Type 'quit', 'exit' or 'bye' to leave the conversation, or press Ctrl+C."
)]
pub struct Args {
    /// Answer a single request and exit instead of starting a conversation
    #[arg(short = 'r', long, value_name = "TEXT")]
    pub request: Option<String>,

    /// Model to use
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(short = 't', long)]
    pub temperature: Option<f32>,

    /// Seconds to wait for each LLM response
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum model calls per turn
    #[arg(long, value_name = "N")]
    pub max_steps: Option<usize>,

    /// Print the tools offered by the MCP server and exit
    #[arg(long)]
    pub list_tools: bool,
}

impl Args {
    /// Apply the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut TravelAgentConfig) {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        if let Some(secs) = self.timeout {
            config.request_timeout = std::time::Duration::from_secs(secs);
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
    }
}

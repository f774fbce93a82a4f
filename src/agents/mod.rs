//! Agents built on the LLM broker.
//!
//! - [`ReactAgent`] - reason-and-act loop over a broker and its tools
//! - [`ChatSession`] - conversation history handed to an agent turn by turn
//! - [`TravelPlanningAgent`] - the travel assistant and its terminal loop

pub mod chat_session;
pub mod react_agent;
pub mod travel_planner;

pub use chat_session::{ChatSession, ChatSessionBuilder, SizedLlmMessage};
pub use react_agent::{ReactAgent, ReactAgentBuilder};
pub use travel_planner::TravelPlanningAgent;

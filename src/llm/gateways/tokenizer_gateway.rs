//! Token counting for conversation history budgets.

use crate::error::{Result, TravelAgentError};
use tiktoken_rs::CoreBPE;

/// Gateway for tokenizing text using tiktoken.
///
/// The exact tokenizer of a hosted model is rarely published, so counts are
/// an estimate; `cl100k_base` is close enough to keep a history under a
/// context budget.
///
/// # Examples
///
/// ```
/// use travel_planner::llm::gateways::TokenizerGateway;
///
/// let tokenizer = TokenizerGateway::new("cl100k_base").unwrap();
/// assert!(tokenizer.count_tokens("Hotels near the Eiffel Tower") > 0);
/// ```
pub struct TokenizerGateway {
    tokenizer: CoreBPE,
}

impl TokenizerGateway {
    /// Creates a new TokenizerGateway with the specified encoding.
    ///
    /// Supported encodings are `cl100k_base`, `p50k_base` and `r50k_base`.
    pub fn new(encoding: &str) -> Result<Self> {
        let tokenizer = match encoding {
            "cl100k_base" => tiktoken_rs::cl100k_base(),
            "p50k_base" => tiktoken_rs::p50k_base(),
            "r50k_base" => tiktoken_rs::r50k_base(),
            _ => {
                return Err(TravelAgentError::ConfigError(format!(
                    "Unsupported encoding model: {}",
                    encoding
                )))
            }
        }
        .map_err(|e| TravelAgentError::ConfigError(e.to_string()))?;

        Ok(Self { tokenizer })
    }

    /// Encodes text into token ids.
    pub fn encode(&self, text: &str) -> Vec<usize> {
        self.tokenizer.encode_with_special_tokens(text)
    }

    /// Counts the number of tokens in a text string.
    pub fn count_tokens(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}

impl Default for TokenizerGateway {
    fn default() -> Self {
        Self::new("cl100k_base").expect("cl100k_base should always be available")
    }
}

//! Language-model capability.
//!
//! Nodes depend on [`LlmClient`] only; [`MockLlm`] backs tests and [`ChatOpenAI`]
//! (feature `openai`) talks to any OpenAI-compatible chat completions endpoint.

mod mock;
#[cfg(feature = "openai")]
mod openai;
mod prompt;

pub use mock::MockLlm;
#[cfg(feature = "openai")]
pub use openai::ChatOpenAI;
pub use prompt::{PromptError, PromptTemplate, DIRECT_ANSWER, GRADER, PRODUCT_BOT, REWRITER};

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;

/// Response from an LLM completion.
///
/// **Interaction**: Returned by `LlmClient::invoke()`; nodes read `content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    /// Assistant message content (plain text).
    pub content: String,
}

/// LLM client: given messages, returns assistant text.
///
/// Shared by every node of a controller as `Arc<dyn LlmClient>`; implementations must not
/// keep per-call state that changes answers between identical requests.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn: read messages, return assistant content.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;

    /// Single-prompt convenience: sends `prompt` as one user message.
    async fn complete(&self, prompt: &str) -> Result<String, AgentError> {
        let response = self.invoke(&[Message::user(prompt)]).await?;
        Ok(response.content)
    }
}

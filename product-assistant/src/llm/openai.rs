//! `ChatOpenAI`: [`LlmClient`] over an OpenAI-compatible chat completions endpoint.
//!
//! Each node call is one stateless request; the conversation log is not replayed, only the
//! rendered prompt the node passes in.

use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessage, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

/// Chat model used by the assistant, grader, rewriter and generator nodes.
///
/// [`new`](Self::new) reads `OPENAI_API_KEY` the way `async-openai` does;
/// [`with_config`](Self::with_config) takes an explicit key and base URL (local gateways,
/// Azure-style proxies).
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    pub fn new(model: impl Into<String>) -> Self {
        Self::from_client(Client::new(), model)
    }

    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self::from_client(Client::with_config(config), model)
    }

    fn from_client(client: Client<OpenAIConfig>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            temperature: None,
        }
    }

    /// Sampling temperature, 0 to 2. Unset leaves the endpoint default.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_wire(message: &Message) -> ChatCompletionRequestMessage {
        match message {
            Message::User(text) => ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage::from(text.as_str()),
            ),
            Message::Assistant(text) => {
                ChatCompletionRequestMessage::Assistant(text.as_str().into())
            }
        }
    }

    fn request(&self, messages: &[Message]) -> Result<CreateChatCompletionRequest, AgentError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.as_str())
            .messages(messages.iter().map(Self::to_wire).collect::<Vec<_>>());
        if let Some(t) = self.temperature {
            args.temperature(t);
        }
        args.build()
            .map_err(|e| AgentError::ExecutionFailed(format!("chat request invalid: {}", e)))
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let request = self.request(messages)?;
        let prompt_chars: usize = messages.iter().map(|m| m.content().len()).sum();
        debug!(model = %self.model, prompt_chars, "chat completion request");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("chat completion failed: {}", e)))?;

        let Some(choice) = response.choices.into_iter().next() else {
            return Err(AgentError::ExecutionFailed(format!(
                "model {} returned no choices",
                self.model
            )));
        };
        let content = choice.message.content.unwrap_or_else(|| {
            warn!(model = %self.model, "chat completion without text content");
            String::new()
        });
        Ok(LlmResponse { content })
    }
}

//! Mock LLM for tests and offline runs.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

/// Deterministic LLM double.
///
/// Replies by the first rule whose needle occurs in the prompt, else with the default
/// reply. Every prompt is recorded so tests can assert which nodes called the model.
///
/// **Interaction**: Implements `LlmClient`; injected into `AgentServices` in tests.
pub struct MockLlm {
    default_reply: Option<String>,
    rules: Vec<(String, Result<String, String>)>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    /// Answers every prompt with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            default_reply: Some(reply.into()),
            rules: Vec::new(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fails every prompt not matched by a rule.
    pub fn failing() -> Self {
        Self {
            default_reply: None,
            rules: Vec::new(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Replies with `reply` when the prompt contains `needle`.
    pub fn with_rule(mut self, needle: impl Into<String>, reply: impl Into<String>) -> Self {
        self.rules.push((needle.into(), Ok(reply.into())));
        self
    }

    /// Fails with `error` when the prompt contains `needle`.
    pub fn with_failure(mut self, needle: impl Into<String>, error: impl Into<String>) -> Self {
        self.rules.push((needle.into(), Err(error.into())));
        self
    }

    /// Prompts received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// Number of received prompts containing `needle`.
    pub fn calls_containing(&self, needle: &str) -> usize {
        self.prompts()
            .iter()
            .filter(|p| p.contains(needle))
            .count()
    }
}

impl Default for MockLlm {
    fn default() -> Self {
        Self::new("mock answer")
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let prompt = messages
            .iter()
            .map(Message::content)
            .collect::<Vec<_>>()
            .join("\n");
        if let Ok(mut p) = self.prompts.lock() {
            p.push(prompt.clone());
        }

        let outcome = self
            .rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .or_else(|| self.default_reply.clone().map(Ok))
            .unwrap_or_else(|| Err("mock llm has no reply".to_string()));

        outcome
            .map(|content| LlmResponse { content })
            .map_err(AgentError::ExecutionFailed)
    }
}

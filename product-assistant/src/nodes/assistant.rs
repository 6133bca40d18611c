//! Assistant node: product questions go to the index, anything else is answered directly.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::agent::policy::has_product_intent;
use crate::agent::NodeKind;
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::{LlmClient, DIRECT_ANSWER};
use crate::message::{Marker, Message};
use crate::nodes::diagnostic;
use crate::state::AgentState;

pub struct AssistantNode {
    llm: Arc<dyn LlmClient>,
}

impl AssistantNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<AgentState, NodeKind> for AssistantNode {
    fn id(&self) -> NodeKind {
        NodeKind::Assistant
    }

    /// Appends `TOOL: retriever` for product questions, otherwise the model's direct answer.
    async fn run(&self, mut state: AgentState) -> Result<(AgentState, Next<NodeKind>), AgentError> {
        let last = state.last_content().to_string();
        if has_product_intent(&last) {
            info!(node = "assistant", route = "retriever", "product intent detected");
            state.push(Message::control(Marker::ToolRetriever));
            return Ok((state, Next::Continue));
        }

        info!(node = "assistant", route = "direct", "answering directly");
        let prompt = DIRECT_ANSWER
            .render(&[("question", state.question())])
            .map_err(|e| AgentError::ExecutionFailed(e.to_string()))?;
        let answer = match self.llm.complete(&prompt).await {
            Ok(answer) => answer.trim().to_string(),
            Err(e) => {
                warn!(node = "assistant", error = %e, "direct answer failed");
                diagnostic("Direct answer", e)
            }
        };
        state.push(Message::assistant(answer));
        Ok((state, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;

    /// **Scenario**: A product question is routed without calling the model.
    #[tokio::test]
    async fn product_question_routes_to_retriever() {
        let llm = Arc::new(MockLlm::new("unused"));
        let node = AssistantNode::new(llm.clone());
        let (state, next) = node.run(AgentState::new("Price of boAt earbuds?")).await.unwrap();
        assert_eq!(next, Next::Continue);
        assert_eq!(state.last_marker(), Some(Marker::ToolRetriever));
        assert!(llm.prompts().is_empty());
    }

    /// **Scenario**: Other questions get the model's answer with the direct-answer prompt.
    #[tokio::test]
    async fn other_question_answered_directly() {
        let llm = Arc::new(MockLlm::new("  Paris  "));
        let node = AssistantNode::new(llm.clone());
        let (state, _) = node
            .run(AgentState::new("What is the capital of France?"))
            .await
            .unwrap();
        assert_eq!(state.last_content(), "Paris");
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Answer the user directly"));
        assert!(prompts[0].contains("Question: What is the capital of France?"));
    }

    /// **Scenario**: A model fault becomes diagnostic text, not an error.
    #[tokio::test]
    async fn model_fault_becomes_text() {
        let node = AssistantNode::new(Arc::new(MockLlm::failing()));
        let (state, _) = node.run(AgentState::new("hello")).await.unwrap();
        assert!(state.last_content().starts_with("Direct answer failed:"));
        assert_eq!(state.last_marker(), None);
    }
}

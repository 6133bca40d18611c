//! Rewriter node: reformulates the original question for a search engine.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::agent::NodeKind;
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::{LlmClient, REWRITER};
use crate::message::Message;
use crate::nodes::diagnostic;
use crate::state::AgentState;

/// Every pass below the ceiling counts as one rewrite attempt, successful or not. At the
/// ceiling the node does nothing, so the counter never exceeds it.
pub struct RewriterNode {
    llm: Arc<dyn LlmClient>,
    rewrite_ceiling: u32,
}

impl RewriterNode {
    pub fn new(llm: Arc<dyn LlmClient>, rewrite_ceiling: u32) -> Self {
        Self {
            llm,
            rewrite_ceiling,
        }
    }
}

#[async_trait]
impl Node<AgentState, NodeKind> for RewriterNode {
    fn id(&self) -> NodeKind {
        NodeKind::Rewriter
    }

    async fn run(&self, mut state: AgentState) -> Result<(AgentState, Next<NodeKind>), AgentError> {
        if state.retry_count() >= self.rewrite_ceiling {
            info!(node = "rewriter", retry_count = state.retry_count(), "rewrite ceiling reached; skipping");
            return Ok((state, Next::Continue));
        }

        let prompt = REWRITER
            .render(&[("question", state.question())])
            .map_err(|e| AgentError::ExecutionFailed(e.to_string()))?;
        match self.llm.complete(&prompt).await {
            Ok(rewritten) => {
                let rewritten = rewritten.trim().to_string();
                info!(node = "rewriter", attempt = state.retry_count() + 1, %rewritten, "query rewritten");
                state.record_rewrite(Some(rewritten.clone()).filter(|r| !r.is_empty()));
                state.push(Message::assistant(rewritten));
            }
            Err(e) => {
                warn!(node = "rewriter", error = %e, "rewrite failed");
                state.record_rewrite(None);
                state.push(Message::assistant(diagnostic("Query rewrite", e)));
            }
        }
        Ok((state, Next::Continue))
    }
}

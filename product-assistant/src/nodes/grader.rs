//! Grader node: judges whether the retrieved context answers the question.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::agent::NodeKind;
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::{LlmClient, GRADER};
use crate::message::Marker;
use crate::state::{AgentState, Grade};

/// LLM-as-judge: the context is accepted when the lowercased reply contains "yes".
///
/// Once `rewrite_ceiling` rewrites have happened the context is accepted without asking
/// the model. A model fault grades as [`Grade::Rewriter`].
pub struct GraderNode {
    llm: Arc<dyn LlmClient>,
    rewrite_ceiling: u32,
}

impl GraderNode {
    pub fn new(llm: Arc<dyn LlmClient>, rewrite_ceiling: u32) -> Self {
        Self {
            llm,
            rewrite_ceiling,
        }
    }

    async fn judge(&self, question: &str, docs: &str) -> Grade {
        let prompt = match GRADER.render(&[("question", question), ("docs", docs)]) {
            Ok(p) => p,
            Err(e) => {
                warn!(node = "grader", error = %e, "grader prompt failed");
                return Grade::Rewriter;
            }
        };
        match self.llm.complete(&prompt).await {
            Ok(reply) if reply.to_lowercase().contains("yes") => Grade::Generator,
            Ok(_) => Grade::Rewriter,
            Err(e) => {
                warn!(node = "grader", error = %e, "grading failed; treating context as insufficient");
                Grade::Rewriter
            }
        }
    }
}

#[async_trait]
impl Node<AgentState, NodeKind> for GraderNode {
    fn id(&self) -> NodeKind {
        NodeKind::Grader
    }

    async fn run(&self, mut state: AgentState) -> Result<(AgentState, Next<NodeKind>), AgentError> {
        let grade = if state.retry_count() >= self.rewrite_ceiling {
            info!(node = "grader", retry_count = state.retry_count(), "rewrite ceiling reached; accepting context");
            Grade::Generator
        } else {
            let (_, docs) = Marker::split_source(state.last_content());
            self.judge(state.question(), docs).await
        };
        info!(node = "grader", ?grade, "graded");
        state.set_grade(grade);
        Ok((state, Next::Continue))
    }
}

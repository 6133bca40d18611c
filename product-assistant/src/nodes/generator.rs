//! Generator node: grounded answer from the context the previous node appended.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::agent::policy::{contains_apology, no_information_message};
use crate::agent::NodeKind;
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::{LlmClient, PRODUCT_BOT};
use crate::message::{Marker, Message};
use crate::nodes::diagnostic;
use crate::state::AgentState;

/// Reads the last message as context, strips its source indicator for the prompt and puts
/// it back in front of the answer.
///
/// The no-information message is passed through untouched. An apologetic answer is sent to
/// web search once; after web search it is returned as is.
pub struct GeneratorNode {
    llm: Arc<dyn LlmClient>,
}

impl GeneratorNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<AgentState, NodeKind> for GeneratorNode {
    fn id(&self) -> NodeKind {
        NodeKind::Generator
    }

    async fn run(&self, mut state: AgentState) -> Result<(AgentState, Next<NodeKind>), AgentError> {
        let sentinel = no_information_message(state.question());
        let (indicator, context) = {
            let (indicator, body) = Marker::split_source(state.last_content());
            (indicator, body.to_string())
        };

        if context.trim().is_empty() || context == sentinel {
            info!(node = "generator", "no context; returning no-information message");
            if state.last_content() != sentinel {
                state.push(Message::assistant(sentinel));
            }
            return Ok((state, Next::Continue));
        }

        let prompt = PRODUCT_BOT
            .render(&[("context", context.as_str()), ("question", state.question())])
            .map_err(|e| AgentError::ExecutionFailed(e.to_string()))?;
        let answer = match self.llm.complete(&prompt).await {
            Ok(answer) => answer.trim().to_string(),
            Err(e) => {
                warn!(node = "generator", error = %e, "generation failed");
                state.push(Message::assistant(diagnostic("Answer generation", e)));
                return Ok((state, Next::Continue));
            }
        };

        if contains_apology(&answer) && !state.web_search_attempted() {
            info!(node = "generator", "answer reads as a fallback; escalating to web search");
            state.push(Message::control(Marker::ToolWebSearch));
            return Ok((state, Next::Continue));
        }

        info!(node = "generator", source = ?indicator, chars = answer.len(), "answer generated");
        let answer = match indicator {
            Some(marker) => Message::tagged(marker, &answer),
            None => Message::assistant(answer),
        };
        state.push(answer);
        Ok((state, Next::Continue))
    }
}

//! Retriever node: looks the original question up in the product index.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::agent::policy::contains_apology;
use crate::agent::NodeKind;
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::{Marker, Message};
use crate::nodes::diagnostic;
use crate::retriever::{format_records, DocumentRetriever};
use crate::state::AgentState;

pub struct RetrieverNode {
    retriever: Arc<dyn DocumentRetriever>,
}

impl RetrieverNode {
    pub fn new(retriever: Arc<dyn DocumentRetriever>) -> Self {
        Self { retriever }
    }
}

#[async_trait]
impl Node<AgentState, NodeKind> for RetrieverNode {
    fn id(&self) -> NodeKind {
        NodeKind::Retriever
    }

    /// Appends `[Source: Database]` context, or `TOOL: websearch` when the index has nothing
    /// usable or fails.
    async fn run(&self, mut state: AgentState) -> Result<(AgentState, Next<NodeKind>), AgentError> {
        let query = state.question().to_string();
        info!(node = "retriever", %query, "querying product index");

        match self.retriever.retrieve(&query).await {
            Ok(records) if records.is_empty() => {
                info!(node = "retriever", "no records; escalating to web search");
                state.push(Message::control(Marker::ToolWebSearch));
            }
            Ok(records) => {
                let context = format_records(&records);
                debug!(node = "retriever", records = records.len(), bytes = context.len(), "context formatted");
                if contains_apology(&context) {
                    info!(node = "retriever", "context reads as a fallback; escalating to web search");
                    state.push(Message::control(Marker::ToolWebSearch));
                } else {
                    state.push(Message::tagged(Marker::SourceDatabase, &context));
                }
            }
            Err(e) => {
                warn!(node = "retriever", error = %e, "retrieval failed; escalating to web search");
                state.push(Message::assistant(diagnostic("Retrieval", e)));
                state.push(Message::control(Marker::ToolWebSearch));
            }
        }
        Ok((state, Next::Continue))
    }
}

//! Web search node: fetches web context for the (possibly rewritten) question.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::agent::policy::{is_invalid_web_context, no_information_message};
use crate::agent::NodeKind;
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::{Marker, Message};
use crate::state::AgentState;
use crate::websearch::WebSearchClient;

pub struct WebSearchNode {
    client: WebSearchClient,
}

impl WebSearchNode {
    pub fn new(client: WebSearchClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Node<AgentState, NodeKind> for WebSearchNode {
    fn id(&self) -> NodeKind {
        NodeKind::WebSearch
    }

    /// Appends `[Source: Web Search]` context, or the no-information message when the search
    /// produced nothing usable.
    async fn run(&self, mut state: AgentState) -> Result<(AgentState, Next<NodeKind>), AgentError> {
        let query = state
            .rewritten_query()
            .unwrap_or(state.question())
            .to_string();
        info!(node = "web_search", %query, "searching the web");

        let context = self.client.lookup(&query).await;
        state.mark_web_search();

        if is_invalid_web_context(&context, &query) || is_invalid_web_context(&context, state.question()) {
            warn!(node = "web_search", "no usable web context");
            let message = no_information_message(state.question());
            state.push(Message::assistant(message));
        } else {
            state.push(Message::tagged(Marker::SourceWebSearch, &context));
        }
        Ok((state, Next::Continue))
    }
}

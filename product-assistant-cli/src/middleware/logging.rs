//! Logging middleware that records node enter/exit around each node.run call.

use async_trait::async_trait;
use tracing::debug;

use product_assistant::{AgentError, AgentState, Next, NodeKind, NodeMiddleware, NodeRunner};

/// Middleware that logs node enter/exit (with the node's transition) at debug level.
///
/// Attached by the CLI with `--verbose`.
pub struct LoggingMiddleware;

#[async_trait]
impl NodeMiddleware<AgentState, NodeKind> for LoggingMiddleware {
    async fn around_run(
        &self,
        node_id: NodeKind,
        state: AgentState,
        inner: NodeRunner<AgentState, NodeKind>,
    ) -> Result<(AgentState, Next<NodeKind>), AgentError> {
        debug!(node = %node_id, messages = state.messages().len(), "enter node");
        let result = inner(state).await;
        match &result {
            Ok((s, next)) => debug!(
                node = %node_id,
                ?next,
                last_marker = ?s.last_marker(),
                retry_count = s.retry_count(),
                "exit node"
            ),
            Err(e) => debug!(node = %node_id, error = %e, "exit node with error"),
        }
        result
    }
}

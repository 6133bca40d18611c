//! Middleware wrapping every node execution.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, NodeKey};

/// Boxed future of one node run.
pub type NodeFuture<S, K> =
    Pin<Box<dyn Future<Output = Result<(S, Next<K>), AgentError>> + Send>>;

/// Continuation that actually runs the wrapped node.
pub type NodeRunner<S, K> = Box<dyn FnOnce(S) -> NodeFuture<S, K> + Send>;

/// Wraps each `Node::run` call of a compiled graph (logging, timing, fault injection).
///
/// Implementations must call `inner` at most once and return its result (or their own).
#[async_trait]
pub trait NodeMiddleware<S, K>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
    K: NodeKey,
{
    async fn around_run(
        &self,
        node_id: K,
        state: S,
        inner: NodeRunner<S, K>,
    ) -> Result<(S, Next<K>), AgentError>;
}

//! Node trait and node identifiers.

use std::fmt::Debug;
use std::hash::Hash;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Next;

/// Identifier of a node in a graph. Implemented for any small copyable key, typically a
/// fieldless enum.
pub trait NodeKey: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> NodeKey for T where T: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

/// One step of a graph: receive state, return updated state and where to go next.
///
/// Most nodes return [`Next::Continue`] and leave the transition to the edges declared on
/// the graph, which keeps routing decisions out of node bodies.
#[async_trait]
pub trait Node<S, K>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
    K: NodeKey,
{
    fn id(&self) -> K;

    async fn run(&self, state: S) -> Result<(S, Next<K>), AgentError>;
}

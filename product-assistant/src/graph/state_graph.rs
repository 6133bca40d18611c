//! State graph builder: nodes + declared edges.
//!
//! Register nodes with `add_node`, pick the first one with `set_entry_point`, then give
//! every node exactly one outgoing edge: `add_edge(from, Target)` for a fixed transition or
//! `add_conditional_edges(from, router, targets)` for a decision. `compile` (or one of its
//! variants) validates the table and returns a `CompiledStateGraph`.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::error::AgentError;
use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::node::{Node, NodeKey};
use crate::graph::node_middleware::NodeMiddleware;
use crate::graph::Target;
use crate::memory::Checkpointer;

/// Node executions allowed in one invoke before the run is aborted.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Decision function of a conditional edge.
pub type Router<S, K> = Arc<dyn Fn(&S) -> Target<K> + Send + Sync>;

/// Outgoing edge of one node.
pub(super) enum Edge<S, K> {
    Direct(Target<K>),
    Conditional {
        router: Router<S, K>,
        /// Every target the router may return; checked at compile time and at run time.
        targets: Vec<Target<K>>,
    },
}

impl<S, K: Copy> Clone for Edge<S, K> {
    fn clone(&self) -> Self {
        match self {
            Edge::Direct(t) => Edge::Direct(*t),
            Edge::Conditional { router, targets } => Edge::Conditional {
                router: Arc::clone(router),
                targets: targets.clone(),
            },
        }
    }
}

impl<S, K: NodeKey> Edge<S, K> {
    pub(super) fn targets(&self) -> Vec<Target<K>> {
        match self {
            Edge::Direct(t) => vec![*t],
            Edge::Conditional { targets, .. } => targets.clone(),
        }
    }

    /// Picks the next target for `state`. A router returning an undeclared target is a
    /// run-level fault.
    pub(super) fn resolve(&self, from: K, state: &S) -> Result<Target<K>, AgentError> {
        match self {
            Edge::Direct(t) => Ok(*t),
            Edge::Conditional { router, targets } => {
                let target = router(state);
                if targets.contains(&target) {
                    Ok(target)
                } else {
                    Err(AgentError::ExecutionFailed(format!(
                        "router of {:?} returned undeclared target {:?}",
                        from, target
                    )))
                }
            }
        }
    }
}

/// State graph: nodes plus an edge table keyed by node id.
///
/// Generic over state type `S` and node key `K`.
///
/// **Interaction**: Accepts `Arc<dyn Node<S, K>>`; produces `CompiledStateGraph<S, K>`.
/// Checkpointer and middleware are passed at compile time only.
pub struct StateGraph<S, K> {
    nodes: HashMap<K, Arc<dyn Node<S, K>>>,
    entry: Option<K>,
    edges: Vec<(K, Edge<S, K>)>,
    recursion_limit: usize,
}

impl<S, K> Default for StateGraph<S, K>
where
    S: Clone + Send + Sync + 'static,
    K: NodeKey,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, K> StateGraph<S, K>
where
    S: Clone + Send + Sync + 'static,
    K: NodeKey,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            entry: None,
            edges: Vec::new(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Adds a node; replaces an existing node with the same id.
    pub fn add_node(&mut self, id: K, node: Arc<dyn Node<S, K>>) -> &mut Self {
        self.nodes.insert(id, node);
        self
    }

    /// Node the run starts from.
    pub fn set_entry_point(&mut self, id: K) -> &mut Self {
        self.entry = Some(id);
        self
    }

    /// Fixed transition from `from` to `to`.
    pub fn add_edge(&mut self, from: K, to: Target<K>) -> &mut Self {
        self.edges.push((from, Edge::Direct(to)));
        self
    }

    /// Decision after `from`: `router` inspects the updated state and returns one of
    /// `targets`.
    pub fn add_conditional_edges<F>(
        &mut self,
        from: K,
        router: F,
        targets: impl IntoIterator<Item = Target<K>>,
    ) -> &mut Self
    where
        F: Fn(&S) -> Target<K> + Send + Sync + 'static,
    {
        self.edges.push((
            from,
            Edge::Conditional {
                router: Arc::new(router),
                targets: targets.into_iter().collect(),
            },
        ));
        self
    }

    /// Overrides [`DEFAULT_RECURSION_LIMIT`].
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Builds the executable graph without persistence or middleware.
    pub fn compile(self) -> Result<CompiledStateGraph<S, K>, CompilationError> {
        self.compile_internal(None, None)
    }

    /// Builds the executable graph with a checkpointer; runs invoked with a `thread_id`
    /// save a checkpoint after every node.
    pub fn compile_with_checkpointer(
        self,
        checkpointer: Arc<dyn Checkpointer<S, K>>,
    ) -> Result<CompiledStateGraph<S, K>, CompilationError> {
        self.compile_internal(Some(checkpointer), None)
    }

    /// Builds the executable graph with node middleware wrapping each node run.
    pub fn compile_with_middleware(
        self,
        middleware: Arc<dyn NodeMiddleware<S, K>>,
    ) -> Result<CompiledStateGraph<S, K>, CompilationError> {
        self.compile_internal(None, Some(middleware))
    }

    /// Builds the executable graph with both checkpointer and node middleware.
    pub fn compile_with_checkpointer_and_middleware(
        self,
        checkpointer: Arc<dyn Checkpointer<S, K>>,
        middleware: Arc<dyn NodeMiddleware<S, K>>,
    ) -> Result<CompiledStateGraph<S, K>, CompilationError> {
        self.compile_internal(Some(checkpointer), Some(middleware))
    }

    fn compile_internal(
        self,
        checkpointer: Option<Arc<dyn Checkpointer<S, K>>>,
        middleware: Option<Arc<dyn NodeMiddleware<S, K>>>,
    ) -> Result<CompiledStateGraph<S, K>, CompilationError> {
        let entry = self.entry.ok_or(CompilationError::MissingEntry)?;
        if !self.nodes.contains_key(&entry) {
            return Err(CompilationError::NodeNotFound(format!("{:?}", entry)));
        }

        let mut edges: HashMap<K, Edge<S, K>> = HashMap::new();
        for (from, edge) in self.edges {
            if !self.nodes.contains_key(&from) {
                return Err(CompilationError::NodeNotFound(format!("{:?}", from)));
            }
            let targets = edge.targets();
            if targets.is_empty() {
                return Err(CompilationError::MissingEdge(format!("{:?}", from)));
            }
            for target in targets {
                if let Target::Node(to) = target {
                    if !self.nodes.contains_key(&to) {
                        return Err(CompilationError::NodeNotFound(format!("{:?}", to)));
                    }
                }
            }
            if edges.insert(from, edge).is_some() {
                return Err(CompilationError::DuplicateEdge(format!("{:?}", from)));
            }
        }

        for id in self.nodes.keys() {
            if !edges.contains_key(id) {
                return Err(CompilationError::MissingEdge(format!("{:?}", id)));
            }
        }

        if !end_reachable(entry, &edges) {
            return Err(CompilationError::UnreachableEnd);
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            entry,
            edges,
            checkpointer,
            middleware,
            recursion_limit: self.recursion_limit,
        })
    }
}

/// Breadth-first walk over declared targets.
fn end_reachable<S, K: NodeKey>(entry: K, edges: &HashMap<K, Edge<S, K>>) -> bool {
    let mut seen = HashSet::from([entry]);
    let mut queue = VecDeque::from([entry]);
    while let Some(id) = queue.pop_front() {
        let Some(edge) = edges.get(&id) else {
            continue;
        };
        for target in edge.targets() {
            match target {
                Target::End => return true,
                Target::Node(next) => {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
    }
    false
}

//! Compiled state graph: immutable, supports invoke and resume.
//!
//! Built by `StateGraph::compile` or one of its variants. Holds nodes, the edge table and
//! the optional checkpointer / middleware. When a checkpointer is set and the config has a
//! `thread_id`, a checkpoint is written before the first node and after every node.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AgentError;
use crate::graph::logging::{
    log_checkpoint_error, log_graph_complete, log_graph_error, log_graph_start,
    log_node_complete, log_node_start,
};
use crate::graph::node_middleware::{NodeFuture, NodeMiddleware, NodeRunner};
use crate::graph::state_graph::Edge;
use crate::graph::{Next, Node, NodeKey, Target};
use crate::memory::{Checkpoint, CheckpointSource, Checkpointer, RunnableConfig};

/// Compiled graph: immutable structure.
///
/// Runs from the entry node; after each node, uses the node's returned `Next` or, for
/// `Next::Continue`, the node's declared edge to pick the next node.
pub struct CompiledStateGraph<S, K> {
    pub(super) nodes: HashMap<K, Arc<dyn Node<S, K>>>,
    pub(super) entry: K,
    pub(super) edges: HashMap<K, Edge<S, K>>,
    pub(super) checkpointer: Option<Arc<dyn Checkpointer<S, K>>>,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S, K>>>,
    pub(super) recursion_limit: usize,
}

impl<S, K: Copy> Clone for CompiledStateGraph<S, K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            entry: self.entry,
            edges: self.edges.clone(),
            checkpointer: self.checkpointer.clone(),
            middleware: self.middleware.clone(),
            recursion_limit: self.recursion_limit,
        }
    }
}

impl<S, K> CompiledStateGraph<S, K>
where
    S: Clone + Send + Sync + 'static,
    K: NodeKey,
{
    /// Runs the graph with the given state from the entry node.
    ///
    /// Pass `None` for config (or a config without `thread_id`) to run without persistence.
    ///
    /// - `Next::Continue`: follow the declared edge of the node.
    /// - `Next::Node(id)`: run the node with that id next.
    /// - `Next::End`: stop and return current state.
    pub async fn invoke(&self, state: S, config: Option<RunnableConfig>) -> Result<S, AgentError> {
        log_graph_start(
            self.entry,
            config.as_ref().and_then(|c| c.thread_id.as_deref()),
        );
        self.save(&config, &state, Some(self.entry), CheckpointSource::Input, 0)
            .await;
        let result = self.run_loop(state, &config, self.entry, 0).await;
        if let Err(e) = &result {
            log_graph_error(e);
        }
        result
    }

    /// Continues the thread's run from its latest checkpoint (or `config.checkpoint_id`).
    ///
    /// A finished checkpoint returns its state without running anything.
    pub async fn resume(&self, config: RunnableConfig) -> Result<S, AgentError> {
        let checkpoint = self.get_state(&config).await?.ok_or_else(|| {
            AgentError::ExecutionFailed(format!(
                "no checkpoint for thread {:?}",
                config.thread_id.as_deref().unwrap_or_default()
            ))
        })?;
        let Some(next) = checkpoint.next else {
            return Ok(checkpoint.state);
        };
        let config = Some(RunnableConfig {
            checkpoint_id: None,
            ..config
        });
        let result = self
            .run_loop(checkpoint.state, &config, next, checkpoint.metadata.step)
            .await;
        if let Err(e) = &result {
            log_graph_error(e);
        }
        result
    }

    /// Latest (or selected) checkpoint of the thread; `Ok(None)` without a checkpointer.
    pub async fn get_state(
        &self,
        config: &RunnableConfig,
    ) -> Result<Option<Checkpoint<S, K>>, AgentError> {
        match &self.checkpointer {
            Some(cp) => Ok(cp.get_tuple(config).await?),
            None => Ok(None),
        }
    }

    /// Steps through nodes until a node or edge leads to END.
    async fn run_loop(
        &self,
        mut state: S,
        config: &Option<RunnableConfig>,
        start: K,
        mut step: u64,
    ) -> Result<S, AgentError> {
        let mut current = Some(start);
        let mut executed = 0usize;

        while let Some(id) = current {
            if executed >= self.recursion_limit {
                return Err(AgentError::RecursionLimit(self.recursion_limit));
            }
            let node = self
                .nodes
                .get(&id)
                .cloned()
                .ok_or_else(|| AgentError::ExecutionFailed(format!("node not found: {:?}", id)))?;

            log_node_start(id);
            let (new_state, next) = match &self.middleware {
                Some(middleware) => {
                    let inner: NodeRunner<S, K> = Box::new(move |s| -> NodeFuture<S, K> {
                        Box::pin(async move { node.run(s).await })
                    });
                    middleware.around_run(id, state, inner).await?
                }
                None => node.run(state).await?,
            };
            state = new_state;
            executed += 1;
            step += 1;

            let target = match next {
                Next::End => Target::End,
                Next::Node(k) => Target::Node(k),
                Next::Continue => self
                    .edges
                    .get(&id)
                    .ok_or_else(|| {
                        AgentError::ExecutionFailed(format!("no edge declared for {:?}", id))
                    })?
                    .resolve(id, &state)?,
            };
            log_node_complete(id, &target);

            current = match target {
                Target::Node(k) => Some(k),
                Target::End => None,
            };
            self.save(config, &state, current, CheckpointSource::Loop, step)
                .await;
        }

        log_graph_complete(executed);
        Ok(state)
    }

    async fn save(
        &self,
        config: &Option<RunnableConfig>,
        state: &S,
        next: Option<K>,
        source: CheckpointSource,
        step: u64,
    ) {
        if let (Some(cp), Some(cfg)) = (&self.checkpointer, config) {
            if cfg.thread_id.is_some() {
                let checkpoint = Checkpoint::from_state(state.clone(), next, source, step);
                if let Err(e) = cp.put(cfg, &checkpoint).await {
                    log_checkpoint_error(&e);
                }
            }
        }
    }
}

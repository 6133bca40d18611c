//! Invoke config: thread_id, checkpoint_ns, checkpoint_id.
//!
//! Aligns with LangGraph's config["configurable"]. Used by CompiledStateGraph::invoke,
//! CompiledStateGraph::resume and Checkpointer.

/// Config for a single invoke. Identifies the thread (session) and optional checkpoint.
///
/// When the graph has a checkpointer, a run only persists state if `thread_id` is set.
///
/// **Interaction**: Passed to `CompiledStateGraph::invoke(state, config)` and
/// `Checkpointer::put` / `get_tuple` / `list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnableConfig {
    /// Session identifier; checkpoints are namespaced by it.
    pub thread_id: Option<String>,
    /// Optional namespace inside a thread. Default is empty.
    pub checkpoint_ns: String,
    /// If set, resume from this checkpoint instead of the latest.
    pub checkpoint_id: Option<String>,
}

impl RunnableConfig {
    /// Config for the given session with default namespace and latest checkpoint.
    pub fn for_thread(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
            ..Default::default()
        }
    }
}

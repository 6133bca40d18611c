//! Run-level error types.
//!
//! Node-level faults (a model call failing, the index being unreachable) are turned into
//! text at the node boundary and never show up here. `AgentError` is what a caller of
//! [`ProductAgent::run`](crate::agent::ProductAgent::run) sees when the run as a whole fails.

use std::time::Duration;

use thiserror::Error;

use crate::memory::CheckpointError;

/// Agent execution error.
///
/// Returned by `Node::run`, `CompiledStateGraph::invoke` and the controller entry points.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. LLM call failed, graph misconfigured).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The caller passed a blank query.
    #[error("query must not be empty")]
    EmptyQuery,

    /// The whole run exceeded its wall-clock limit.
    #[error("run timed out after {0:?}")]
    Timeout(Duration),

    /// The caller's cancellation hook fired before the run finished.
    #[error("run cancelled")]
    Cancelled,

    /// More node executions than the graph's recursion limit.
    #[error("recursion limit of {0} node executions reached")]
    RecursionLimit(usize),

    /// Loading a checkpoint failed (resume / session inspection).
    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}

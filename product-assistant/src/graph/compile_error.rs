//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when the declared nodes and edges cannot form a
//! runnable graph.

use thiserror::Error;

/// Error when compiling a state graph.
///
/// Node ids are rendered with `Debug` since keys are generic.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// `set_entry_point` was never called.
    #[error("graph has no entry point")]
    MissingEntry,

    /// An entry point, edge source or edge target was not registered via `add_node`.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// A node has no outgoing edge (or a conditional edge declares no targets).
    #[error("node has no outgoing edge: {0}")]
    MissingEdge(String),

    /// A node has more than one outgoing edge.
    #[error("node has more than one outgoing edge: {0}")]
    DuplicateEdge(String),

    /// No declared path from the entry point reaches END.
    #[error("END is not reachable from the entry point")]
    UnreachableEnd,
}

//! Transition values returned by nodes and routers.

/// What a node asks the graph to do after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next<K> {
    /// Follow the edge declared for this node.
    Continue,
    /// Jump to the given node, ignoring declared edges.
    Node(K),
    /// Stop the run.
    End,
}

/// Destination of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target<K> {
    Node(K),
    End,
}

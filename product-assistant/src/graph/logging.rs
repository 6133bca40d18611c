//! Logging utilities for graph execution.
//!
//! Structured `tracing` events for graph and node lifecycle.

use std::fmt::Debug;

use crate::error::AgentError;
use crate::graph::Target;

pub fn log_node_start<K: Debug>(node_id: K) {
    tracing::debug!(node_id = ?node_id, "Starting node execution");
}

pub fn log_node_complete<K: Debug>(node_id: K, next: &Target<K>) {
    tracing::debug!(node_id = ?node_id, ?next, "Node execution complete");
}

pub fn log_graph_start<K: Debug>(entry: K, thread_id: Option<&str>) {
    tracing::info!(entry = ?entry, thread_id, "Starting graph execution");
}

pub fn log_graph_complete(steps: usize) {
    tracing::info!(steps, "Graph execution complete");
}

pub fn log_graph_error(error: &AgentError) {
    tracing::error!(%error, "Graph execution error");
}

pub fn log_checkpoint_error(error: &crate::memory::CheckpointError) {
    tracing::warn!(%error, "Failed to save checkpoint; continuing without it");
}

//! Checkpointer trait and its error type.

use async_trait::async_trait;
use thiserror::Error;

use crate::memory::checkpoint::{Checkpoint, CheckpointListItem};
use crate::memory::config::RunnableConfig;

/// Error from a checkpointer operation.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The config carries no thread_id, so there is nowhere to read from or write to.
    #[error("thread_id is required for checkpointing")]
    ThreadIdRequired,

    /// No checkpoint with the requested id exists in the thread.
    #[error("checkpoint not found: {0}")]
    NotFound(String),

    /// Backend failure.
    #[error("checkpoint storage error: {0}")]
    Storage(String),
}

/// Saves and loads per-thread checkpoints.
///
/// **Interaction**: Called by `CompiledStateGraph` after each node (put) and by
/// `resume` / `get_state` (get_tuple).
#[async_trait]
pub trait Checkpointer<S, K>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
    K: Clone + Send + Sync + 'static,
{
    /// Stores a checkpoint for `config.thread_id`; returns its id.
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S, K>,
    ) -> Result<String, CheckpointError>;

    /// Loads `config.checkpoint_id` if set, else the latest checkpoint of the thread.
    async fn get_tuple(
        &self,
        config: &RunnableConfig,
    ) -> Result<Option<Checkpoint<S, K>>, CheckpointError>;

    /// Lists the thread's checkpoints, oldest first.
    async fn list(&self, config: &RunnableConfig)
        -> Result<Vec<CheckpointListItem>, CheckpointError>;
}

//! In-memory checkpointer.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::memory::checkpoint::{Checkpoint, CheckpointListItem};
use crate::memory::checkpointer::{CheckpointError, Checkpointer};
use crate::memory::config::RunnableConfig;

type ThreadKey = (String, String);

/// In-memory checkpointer keyed by (thread_id, checkpoint_ns).
///
/// Threads never see each other's checkpoints. One saver can be shared by concurrently
/// running sessions.
///
/// By default each thread keeps its full history, so memory grows with every run. Use
/// [`with_history_limit`](Self::with_history_limit) for long-lived savers: older
/// checkpoints are dropped once a thread holds more than the limit.
pub struct MemorySaver<S, K> {
    threads: RwLock<HashMap<ThreadKey, Vec<Checkpoint<S, K>>>>,
    history_limit: Option<usize>,
}

impl<S, K> Default for MemorySaver<S, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, K> MemorySaver<S, K> {
    pub fn new() -> Self {
        Self {
            threads: RwLock::new(HashMap::new()),
            history_limit: None,
        }
    }

    /// Keeps at most `limit` (minimum 1) checkpoints per thread, newest last.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit.max(1));
        self
    }

    fn thread_key(config: &RunnableConfig) -> Result<ThreadKey, CheckpointError> {
        let thread_id = config
            .thread_id
            .clone()
            .ok_or(CheckpointError::ThreadIdRequired)?;
        Ok((thread_id, config.checkpoint_ns.clone()))
    }
}

#[async_trait]
impl<S, K> Checkpointer<S, K> for MemorySaver<S, K>
where
    S: Clone + Send + Sync + 'static,
    K: Clone + Send + Sync + 'static,
{
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S, K>,
    ) -> Result<String, CheckpointError> {
        let key = Self::thread_key(config)?;
        let mut threads = self.threads.write().await;
        let history = threads.entry(key).or_default();
        history.push(checkpoint.clone());
        if let Some(limit) = self.history_limit {
            let excess = history.len().saturating_sub(limit);
            history.drain(..excess);
        }
        Ok(checkpoint.id.clone())
    }

    async fn get_tuple(
        &self,
        config: &RunnableConfig,
    ) -> Result<Option<Checkpoint<S, K>>, CheckpointError> {
        let key = Self::thread_key(config)?;
        let threads = self.threads.read().await;
        let Some(history) = threads.get(&key) else {
            return Ok(None);
        };
        match &config.checkpoint_id {
            Some(id) => history
                .iter()
                .find(|cp| &cp.id == id)
                .cloned()
                .map(Some)
                .ok_or_else(|| CheckpointError::NotFound(id.clone())),
            None => Ok(history.last().cloned()),
        }
    }

    async fn list(
        &self,
        config: &RunnableConfig,
    ) -> Result<Vec<CheckpointListItem>, CheckpointError> {
        let key = Self::thread_key(config)?;
        let threads = self.threads.read().await;
        Ok(threads
            .get(&key)
            .map(|history| {
                history
                    .iter()
                    .map(|cp| CheckpointListItem {
                        checkpoint_id: cp.id.clone(),
                        metadata: cp.metadata.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

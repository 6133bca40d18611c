//! Checkpoint and metadata types.
//!
//! A checkpoint is a state snapshot plus the node the run will execute next, so a run can
//! be resumed exactly where it stopped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

/// Process-wide counter that keeps ids unique within one millisecond.
static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Metadata for a single checkpoint (source, step, created_at).
#[derive(Debug, Clone)]
pub struct CheckpointMetadata {
    pub source: CheckpointSource,
    /// Number of node executions completed when the checkpoint was taken.
    pub step: u64,
    pub created_at: Option<SystemTime>,
}

/// Where in a run the checkpoint was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointSource {
    /// Initial state, before the first node.
    Input,
    /// After a node completed.
    Loop,
}

/// One checkpoint: state snapshot, pending node and id/ts.
///
/// Stored by Checkpointer keyed by (thread_id, checkpoint_ns, id). `next` is `None` once
/// the run reached the end of the graph.
#[derive(Debug, Clone)]
pub struct Checkpoint<S, K> {
    pub id: String,
    pub ts: String,
    pub state: S,
    pub next: Option<K>,
    pub metadata: CheckpointMetadata,
}

/// Item returned by Checkpointer::list for history inspection.
#[derive(Debug, Clone)]
pub struct CheckpointListItem {
    pub checkpoint_id: String,
    pub metadata: CheckpointMetadata,
}

impl<S, K> Checkpoint<S, K> {
    /// Creates a checkpoint from the current state.
    ///
    /// The id is `{millis}-{seq}-{step}`; `seq` is unique per process, so two runs of one
    /// thread never share an id.
    pub fn from_state(state: S, next: Option<K>, source: CheckpointSource, step: u64) -> Self {
        let now = SystemTime::now();
        let ts = format!(
            "{}",
            now.duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0)
        );
        let seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
        let id = format!("{}-{}-{}", ts, seq, step);
        Self {
            id,
            ts,
            state,
            next,
            metadata: CheckpointMetadata {
                source,
                step,
                created_at: Some(now),
            },
        }
    }

    /// True when the run that produced this checkpoint has nothing left to execute.
    pub fn is_finished(&self) -> bool {
        self.next.is_none()
    }
}

//! # Memory: per-session checkpointing
//!
//! A [`Checkpointer`] stores snapshots of the graph state, keyed by
//! `(thread_id, checkpoint_ns, checkpoint_id)`, so a run can be inspected or resumed.
//! The controller uses the session id as `thread_id`.
//!
//! | Type            | Persistence | Use case                 |
//! |-----------------|-------------|--------------------------|
//! | [`MemorySaver`] | In-memory   | Sessions of one process  |
//!
//! Use with [`StateGraph::compile_with_checkpointer`](crate::graph::StateGraph::compile_with_checkpointer).

mod checkpoint;
mod checkpointer;
mod config;
mod memory_saver;

pub use checkpoint::{Checkpoint, CheckpointListItem, CheckpointMetadata, CheckpointSource};
pub use checkpointer::{CheckpointError, Checkpointer};
pub use config::RunnableConfig;
pub use memory_saver::MemorySaver;

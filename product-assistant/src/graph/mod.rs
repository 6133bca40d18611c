//! State graph: nodes + declared edges, compile and invoke.
//!
//! Aligns with LangGraph `StateGraph`: register nodes, set the entry point, declare direct
//! and conditional edges, compile, then invoke with state. Transitions live in the edge
//! table, so routing can be tested without running node bodies.

mod compile_error;
mod compiled;
pub mod logging;
mod next;
mod node;
mod node_middleware;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use next::{Next, Target};
pub use node::{Node, NodeKey};
pub use node_middleware::{NodeFuture, NodeMiddleware, NodeRunner};
pub use state_graph::{Router, StateGraph, DEFAULT_RECURSION_LIMIT};

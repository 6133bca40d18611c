//! Node bodies of the product assistant graph.
//!
//! Each node holds only the service handles it uses and implements
//! `Node<AgentState, NodeKind>`. Nodes append messages and return `Next::Continue`; the
//! transition table in [`crate::agent::routes`] decides where to go. External faults are
//! turned into message text here so a single failing service never aborts the run.

mod assistant;
mod generator;
mod grader;
mod retriever;
mod rewriter;
mod web_search;

pub use assistant::AssistantNode;
pub use generator::GeneratorNode;
pub use grader::GraderNode;
pub use retriever::RetrieverNode;
pub use rewriter::RewriterNode;
pub use web_search::WebSearchNode;

/// Short text standing in for a failed external call.
fn diagnostic(what: &str, err: impl std::fmt::Display) -> String {
    format!("{} failed: {}", what, err)
}

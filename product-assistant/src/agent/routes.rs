//! Transition table of the product assistant graph.
//!
//! | from      | to                                                   |
//! |-----------|------------------------------------------------------|
//! | Assistant | Retriever on `TOOL: retriever`, else End             |
//! | Retriever | WebSearch on `TOOL: websearch`, else Grader          |
//! | Grader    | Generator or Rewriter by grade; Generator at ceiling |
//! | Rewriter  | WebSearch                                            |
//! | WebSearch | Generator                                            |
//! | Generator | WebSearch on `TOOL: websearch`, else End             |
//!
//! Routers are plain functions of the state so the table can be tested without node bodies.

use std::sync::Arc;

use crate::graph::{Node, StateGraph, Target};
use crate::message::Marker;
use crate::state::{AgentState, Grade};

/// Nodes of the product assistant graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Assistant,
    Retriever,
    Grader,
    Rewriter,
    WebSearch,
    Generator,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Assistant => "assistant",
            NodeKind::Retriever => "retriever",
            NodeKind::Grader => "grader",
            NodeKind::Rewriter => "rewriter",
            NodeKind::WebSearch => "web_search",
            NodeKind::Generator => "generator",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn after_assistant(state: &AgentState) -> Target<NodeKind> {
    match state.last_marker() {
        Some(Marker::ToolRetriever) => Target::Node(NodeKind::Retriever),
        _ => Target::End,
    }
}

pub fn after_retriever(state: &AgentState) -> Target<NodeKind> {
    match state.last_marker() {
        Some(Marker::ToolWebSearch) => Target::Node(NodeKind::WebSearch),
        _ => Target::Node(NodeKind::Grader),
    }
}

/// Follows the recorded grade, except that a run at the rewrite ceiling always goes to the
/// generator. A missing grade counts as a rejection.
pub fn after_grader(state: &AgentState, rewrite_ceiling: u32) -> Target<NodeKind> {
    if state.retry_count() >= rewrite_ceiling {
        return Target::Node(NodeKind::Generator);
    }
    match state.grade().unwrap_or(Grade::Rewriter) {
        Grade::Generator => Target::Node(NodeKind::Generator),
        Grade::Rewriter => Target::Node(NodeKind::Rewriter),
    }
}

pub fn after_generator(state: &AgentState) -> Target<NodeKind> {
    match state.last_marker() {
        Some(Marker::ToolWebSearch) => Target::Node(NodeKind::WebSearch),
        _ => Target::End,
    }
}

/// Node bodies, one per [`NodeKind`].
pub struct GraphNodes {
    pub assistant: Arc<dyn Node<AgentState, NodeKind>>,
    pub retriever: Arc<dyn Node<AgentState, NodeKind>>,
    pub grader: Arc<dyn Node<AgentState, NodeKind>>,
    pub rewriter: Arc<dyn Node<AgentState, NodeKind>>,
    pub web_search: Arc<dyn Node<AgentState, NodeKind>>,
    pub generator: Arc<dyn Node<AgentState, NodeKind>>,
}

/// Registers `nodes` and declares the transition table; the caller compiles.
pub fn build_graph(nodes: GraphNodes, rewrite_ceiling: u32) -> StateGraph<AgentState, NodeKind> {
    use NodeKind::*;

    let mut graph = StateGraph::new();
    graph
        .add_node(Assistant, nodes.assistant)
        .add_node(Retriever, nodes.retriever)
        .add_node(Grader, nodes.grader)
        .add_node(Rewriter, nodes.rewriter)
        .add_node(WebSearch, nodes.web_search)
        .add_node(Generator, nodes.generator)
        .set_entry_point(Assistant)
        .add_conditional_edges(
            Assistant,
            after_assistant,
            [Target::Node(Retriever), Target::End],
        )
        .add_conditional_edges(
            Retriever,
            after_retriever,
            [Target::Node(WebSearch), Target::Node(Grader)],
        )
        .add_conditional_edges(
            Grader,
            move |s: &AgentState| after_grader(s, rewrite_ceiling),
            [Target::Node(Generator), Target::Node(Rewriter)],
        )
        .add_edge(Rewriter, Target::Node(WebSearch))
        .add_edge(WebSearch, Target::Node(Generator))
        .add_conditional_edges(
            Generator,
            after_generator,
            [Target::Node(WebSearch), Target::End],
        );
    graph
}

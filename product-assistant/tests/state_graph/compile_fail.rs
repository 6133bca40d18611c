//! StateGraph compile failure cases: missing entry, unknown node, missing edge, and so on.

use std::sync::Arc;

use product_assistant::{CompilationError, StateGraph, Target};

use crate::common::{Inc, Step};

#[tokio::test]
async fn compile_fails_without_entry_point() {
    let mut graph = StateGraph::<u32, Step>::new();
    graph.add_node(Step::A, Arc::new(Inc(Step::A)));
    graph.add_edge(Step::A, Target::End);

    assert!(matches!(graph.compile(), Err(CompilationError::MissingEntry)));
}

#[tokio::test]
async fn compile_fails_when_edge_refers_to_unknown_node() {
    let mut graph = StateGraph::<u32, Step>::new();
    graph.add_node(Step::A, Arc::new(Inc(Step::A)));
    graph.set_entry_point(Step::A);
    graph.add_edge(Step::A, Target::Node(Step::B));

    match graph.compile() {
        Err(CompilationError::NodeNotFound(id)) => assert_eq!(id, "B"),
        _ => panic!("expected NodeNotFound"),
    }
}

#[tokio::test]
async fn compile_fails_when_conditional_target_is_unknown() {
    let mut graph = StateGraph::<u32, Step>::new();
    graph.add_node(Step::A, Arc::new(Inc(Step::A)));
    graph.set_entry_point(Step::A);
    graph.add_conditional_edges(
        Step::A,
        |_: &u32| Target::End,
        [Target::End, Target::Node(Step::C)],
    );

    match graph.compile() {
        Err(CompilationError::NodeNotFound(id)) => assert_eq!(id, "C"),
        _ => panic!("expected NodeNotFound"),
    }
}

#[tokio::test]
async fn compile_fails_when_node_has_no_edge() {
    let mut graph = StateGraph::<u32, Step>::new();
    graph.add_node(Step::A, Arc::new(Inc(Step::A)));
    graph.add_node(Step::B, Arc::new(Inc(Step::B)));
    graph.set_entry_point(Step::A);
    graph.add_edge(Step::A, Target::End);

    match graph.compile() {
        Err(CompilationError::MissingEdge(id)) => assert_eq!(id, "B"),
        _ => panic!("expected MissingEdge"),
    }
}

#[tokio::test]
async fn compile_fails_on_second_edge_from_same_node() {
    let mut graph = StateGraph::<u32, Step>::new();
    graph.add_node(Step::A, Arc::new(Inc(Step::A)));
    graph.add_node(Step::B, Arc::new(Inc(Step::B)));
    graph.set_entry_point(Step::A);
    graph.add_edge(Step::A, Target::Node(Step::B));
    graph.add_edge(Step::A, Target::End);
    graph.add_edge(Step::B, Target::End);

    match graph.compile() {
        Err(CompilationError::DuplicateEdge(id)) => assert_eq!(id, "A"),
        _ => panic!("expected DuplicateEdge"),
    }
}

#[tokio::test]
async fn compile_fails_when_end_is_unreachable() {
    let mut graph = StateGraph::<u32, Step>::new();
    graph.add_node(Step::A, Arc::new(Inc(Step::A)));
    graph.add_node(Step::B, Arc::new(Inc(Step::B)));
    graph.set_entry_point(Step::A);
    graph.add_edge(Step::A, Target::Node(Step::B));
    graph.add_edge(Step::B, Target::Node(Step::A));

    assert!(matches!(graph.compile(), Err(CompilationError::UnreachableEnd)));
}

#[tokio::test]
async fn compiled_cycle_with_exit_runs() {
    let mut graph = StateGraph::<u32, Step>::new();
    graph.add_node(Step::A, Arc::new(Inc(Step::A)));
    graph.add_node(Step::B, Arc::new(Inc(Step::B)));
    graph.set_entry_point(Step::A);
    graph.add_edge(Step::A, Target::Node(Step::B));
    graph.add_conditional_edges(
        Step::B,
        |n: &u32| if *n >= 4 { Target::End } else { Target::Node(Step::A) },
        [Target::Node(Step::A), Target::End],
    );

    let compiled = graph.compile().expect("graph compiles");
    assert_eq!(compiled.invoke(0, None).await.unwrap(), 4);
}

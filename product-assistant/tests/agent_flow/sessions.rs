//! Per-session checkpoints, resume, run bounds and middleware.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use product_assistant::{
    AgentConfig, AgentError, AgentServices, AgentState, MockLlm, Next, NodeKind, NodeMiddleware,
    NodeRunner, ProductAgent,
};

use crate::common::{agent, iphone_hit, CountingRetriever, FakeSearch, SlowLlm};

/// **Scenario**: Concurrent runs under different sessions keep separate checkpoints.
#[tokio::test]
async fn sessions_do_not_share_state() {
    let a = agent(
        Arc::new(MockLlm::new("It costs ₹64,900.")),
        CountingRetriever::empty(),
        Some(FakeSearch::with_hits(vec![iphone_hit()])),
        AgentConfig::default(),
    );

    let (first, second) = tokio::join!(
        a.run("What is the price of iPhone 15?", "alice"),
        a.run("Who wrote Hamlet?", "bob"),
    );
    assert!(first.unwrap().starts_with("[Source: Web Search]"));
    assert_eq!(second.unwrap(), "It costs ₹64,900.");

    let alice = a.session_state("alice").await.unwrap().unwrap();
    let bob = a.session_state("bob").await.unwrap().unwrap();
    assert_eq!(alice.question(), "What is the price of iPhone 15?");
    assert_eq!(bob.question(), "Who wrote Hamlet?");
    assert!(alice.web_search_attempted());
    assert!(!bob.web_search_attempted());
    assert!(a.session_state("carol").await.unwrap().is_none());
}

/// **Scenario**: Each run in a session starts from a fresh state.
#[tokio::test]
async fn each_run_starts_fresh() {
    let a = agent(
        Arc::new(MockLlm::new("answer")),
        CountingRetriever::empty(),
        None,
        AgentConfig::default(),
    );
    a.run("What is the price of iPhone 15?", "s").await.unwrap();
    a.run("Hello there", "s").await.unwrap();

    let state = a.session_state("s").await.unwrap().unwrap();
    assert_eq!(state.question(), "Hello there");
    assert_eq!(state.messages().len(), 2);
    assert_eq!(state.retry_count(), 0);
}

/// **Scenario**: Resuming a finished session returns the same answer; an unknown session
/// is an error.
#[tokio::test]
async fn resume_finished_session() {
    let a = agent(
        Arc::new(MockLlm::new("Paris")),
        CountingRetriever::empty(),
        None,
        AgentConfig::default(),
    );
    let answer = a.run("What is the capital of France?", "s").await.unwrap();
    assert_eq!(a.resume("s").await.unwrap(), answer);
    assert!(matches!(
        a.resume("unknown").await,
        Err(AgentError::ExecutionFailed(_))
    ));
}

/// **Scenario**: A run longer than the wall-clock limit fails with Timeout.
#[tokio::test]
async fn slow_run_times_out() {
    let a = agent(
        Arc::new(SlowLlm(Duration::from_secs(5))),
        CountingRetriever::empty(),
        None,
        AgentConfig::default().with_run_timeout(Some(Duration::from_millis(50))),
    );
    match a.run("Tell me a story", "slow").await {
        Err(AgentError::Timeout(d)) => assert_eq!(d, Duration::from_millis(50)),
        other => panic!("expected Timeout, got {:?}", other),
    }
}

/// **Scenario**: The cancellation hook stops the run with Cancelled.
#[tokio::test]
async fn cancellation_hook_stops_run() {
    let a = agent(
        Arc::new(SlowLlm(Duration::from_secs(5))),
        CountingRetriever::empty(),
        None,
        AgentConfig::default().with_run_timeout(None),
    );
    let cancel = tokio::time::sleep(Duration::from_millis(20));
    let result = a.run_until("Tell me a story", "cancel", cancel).await;
    assert!(matches!(result, Err(AgentError::Cancelled)));
}

/// **Scenario**: A recursion limit below the path length aborts the run.
#[tokio::test]
async fn recursion_limit_is_enforced() {
    let a = agent(
        Arc::new(MockLlm::new("answer")),
        CountingRetriever::empty(),
        None,
        AgentConfig::default().with_recursion_limit(2),
    );
    let result = a.run("What is the price of iPhone 15?", "deep").await;
    assert!(matches!(result, Err(AgentError::RecursionLimit(2))));
}

struct PathRecorder {
    path: Mutex<Vec<NodeKind>>,
}

#[async_trait]
impl NodeMiddleware<AgentState, NodeKind> for PathRecorder {
    async fn around_run(
        &self,
        node_id: NodeKind,
        state: AgentState,
        inner: NodeRunner<AgentState, NodeKind>,
    ) -> Result<(AgentState, Next<NodeKind>), AgentError> {
        self.path.lock().unwrap().push(node_id);
        inner(state).await
    }
}

/// **Scenario**: Middleware sees the web fallback path in order.
#[tokio::test]
async fn middleware_sees_node_path() {
    let recorder = Arc::new(PathRecorder {
        path: Mutex::new(Vec::new()),
    });
    let services = AgentServices::new(
        Arc::new(MockLlm::new("It costs ₹64,900.")),
        CountingRetriever::empty(),
    )
    .with_web_search(FakeSearch::with_hits(vec![iphone_hit()]));
    let a = ProductAgent::with_middleware(services, AgentConfig::default(), recorder.clone())
        .unwrap();

    a.run("What is the price of iPhone 15?", "path").await.unwrap();

    assert_eq!(
        *recorder.path.lock().unwrap(),
        vec![
            NodeKind::Assistant,
            NodeKind::Retriever,
            NodeKind::WebSearch,
            NodeKind::Generator
        ]
    );
}

//! Agent Controller: the product assistant graph and its run-to-completion contract.
//!
//! [`ProductAgent`] owns the compiled graph and a per-process [`MemorySaver`]. Each call to
//! [`run`](ProductAgent::run) starts a fresh [`AgentState`], checkpoints it under the session
//! id and returns the final answer text. Single-node faults never surface here; only
//! run-level failures (empty query, timeout, cancellation, recursion limit) do.

pub mod config;
pub mod policy;
pub mod routes;

pub use config::{AgentConfig, DEFAULT_REWRITE_CEILING, DEFAULT_RUN_TIMEOUT};
pub use routes::NodeKind;

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, NodeMiddleware};
use crate::llm::LlmClient;
use crate::memory::{CheckpointListItem, Checkpointer, MemorySaver, RunnableConfig};
use crate::message::Marker;
use crate::nodes::{
    AssistantNode, GeneratorNode, GraderNode, RetrieverNode, RewriterNode, WebSearchNode,
};
use crate::retriever::DocumentRetriever;
use crate::state::AgentState;
use crate::websearch::{SearchProvider, WebSearchClient};

use policy::{is_echo, no_information_message};
use routes::{build_graph, GraphNodes};

/// Session used when the caller does not name one.
pub const DEFAULT_SESSION: &str = "default";

/// Shared service handles, constructed once and read by every node.
#[derive(Clone)]
pub struct AgentServices {
    pub llm: Arc<dyn LlmClient>,
    pub retriever: Arc<dyn DocumentRetriever>,
    /// `None` runs with web search degraded (no credential).
    pub web_search: Option<Arc<dyn SearchProvider>>,
}

impl AgentServices {
    pub fn new(llm: Arc<dyn LlmClient>, retriever: Arc<dyn DocumentRetriever>) -> Self {
        Self {
            llm,
            retriever,
            web_search: None,
        }
    }

    pub fn with_web_search(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.web_search = Some(provider);
        self
    }
}

/// Product question answering over the decision graph.
///
/// **Interaction**: Built from [`AgentServices`] and [`AgentConfig`]; used by the CLI and by
/// tests with fake services.
pub struct ProductAgent {
    graph: CompiledStateGraph<AgentState, NodeKind>,
    checkpoints: Arc<MemorySaver<AgentState, NodeKind>>,
    config: AgentConfig,
}

impl ProductAgent {
    pub fn new(services: AgentServices, config: AgentConfig) -> Result<Self, CompilationError> {
        Self::build(services, config, None)
    }

    /// Same as [`new`](Self::new), with `middleware` wrapping every node run.
    pub fn with_middleware(
        services: AgentServices,
        config: AgentConfig,
        middleware: Arc<dyn NodeMiddleware<AgentState, NodeKind>>,
    ) -> Result<Self, CompilationError> {
        Self::build(services, config, Some(middleware))
    }

    fn build(
        services: AgentServices,
        config: AgentConfig,
        middleware: Option<Arc<dyn NodeMiddleware<AgentState, NodeKind>>>,
    ) -> Result<Self, CompilationError> {
        let web = WebSearchClient::from_provider(services.web_search)
            .with_max_results(config.search_max_results)
            .with_query_suffix(config.search_query_suffix.clone());
        let ceiling = config.rewrite_ceiling;

        let nodes = GraphNodes {
            assistant: Arc::new(AssistantNode::new(services.llm.clone())),
            retriever: Arc::new(RetrieverNode::new(services.retriever)),
            grader: Arc::new(GraderNode::new(services.llm.clone(), ceiling)),
            rewriter: Arc::new(RewriterNode::new(services.llm.clone(), ceiling)),
            web_search: Arc::new(WebSearchNode::new(web)),
            generator: Arc::new(GeneratorNode::new(services.llm)),
        };
        let graph = build_graph(nodes, ceiling).with_recursion_limit(config.recursion_limit);
        // One run writes an Input checkpoint plus at most one per node execution.
        let checkpoints = Arc::new(
            MemorySaver::<AgentState, NodeKind>::new()
                .with_history_limit(config.recursion_limit + 1),
        );
        let checkpointer = checkpoints.clone();
        let graph = match middleware {
            Some(m) => graph.compile_with_checkpointer_and_middleware(checkpointer, m)?,
            None => graph.compile_with_checkpointer(checkpointer)?,
        };
        Ok(Self {
            graph,
            checkpoints,
            config,
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Answers `query` within the configured wall-clock limit.
    pub async fn run(&self, query: &str, session_id: &str) -> Result<String, AgentError> {
        self.run_until(query, session_id, std::future::pending::<()>())
            .await
    }

    /// Like [`run`](Self::run), but gives up with [`AgentError::Cancelled`] as soon as
    /// `cancel` completes.
    pub async fn run_until<C>(
        &self,
        query: &str,
        session_id: &str,
        cancel: C,
    ) -> Result<String, AgentError>
    where
        C: Future<Output = ()>,
    {
        if query.trim().is_empty() {
            return Err(AgentError::EmptyQuery);
        }
        info!(session = session_id, %query, "run started");
        let config = RunnableConfig::for_thread(session_id);
        let run = self.graph.invoke(AgentState::new(query), Some(config));
        let state = self.bounded(run, cancel).await?;
        Ok(Self::final_answer(&state))
    }

    /// Continues the session's last checkpointed run and returns its answer.
    pub async fn resume(&self, session_id: &str) -> Result<String, AgentError> {
        let run = self.graph.resume(RunnableConfig::for_thread(session_id));
        let state = self.bounded(run, std::future::pending::<()>()).await?;
        Ok(Self::final_answer(&state))
    }

    /// State of the session's latest checkpoint.
    pub async fn session_state(&self, session_id: &str) -> Result<Option<AgentState>, AgentError> {
        let checkpoint = self
            .graph
            .get_state(&RunnableConfig::for_thread(session_id))
            .await?;
        Ok(checkpoint.map(|c| c.state))
    }

    /// Checkpoints kept for the session, oldest first.
    ///
    /// Bounded to one run's worth (`recursion_limit + 1`); older runs are dropped.
    pub async fn session_history(
        &self,
        session_id: &str,
    ) -> Result<Vec<CheckpointListItem>, AgentError> {
        let history = self
            .checkpoints
            .list(&RunnableConfig::for_thread(session_id))
            .await?;
        Ok(history)
    }

    async fn bounded<F, C>(&self, run: F, cancel: C) -> Result<AgentState, AgentError>
    where
        F: Future<Output = Result<AgentState, AgentError>>,
        C: Future<Output = ()>,
    {
        let limited = async {
            match self.config.run_timeout {
                Some(limit) => match tokio::time::timeout(limit, run).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!(?limit, "run timed out");
                        Err(AgentError::Timeout(limit))
                    }
                },
                None => run.await,
            }
        };
        tokio::select! {
            result = limited => result,
            _ = cancel => {
                warn!("run cancelled");
                Err(AgentError::Cancelled)
            }
        }
    }

    /// Last message of the run, with the echo guard applied.
    fn final_answer(state: &AgentState) -> String {
        let question = state.question();
        let answer = state.last_content();
        let (_, body) = Marker::split_source(answer);
        let routing_leftover = state.last_marker().is_some_and(|m| !m.is_source());

        if routing_leftover
            || body.trim().is_empty()
            || is_echo(answer, question)
            || is_echo(body, question)
        {
            warn!("final answer is empty or echoes the question; substituting no-information message");
            return no_information_message(question);
        }
        answer.to_string()
    }
}

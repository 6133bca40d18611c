//! # Product Assistant
//!
//! Agentic question answering over a product catalog. A question flows through a small
//! decision graph: answer directly, look it up in the product index, grade the retrieved
//! context, rewrite the query and search the web, then generate a grounded answer tagged
//! with where its context came from.
//!
//! ## Main Modules
//!
//! - [`graph`]: `StateGraph`, `CompiledStateGraph`, `Node`, `Next`, `Target`: a generic
//!   enum-keyed state graph with declared conditional edges and checkpointing.
//! - [`agent`]: `ProductAgent`, the transition table and the routing heuristics.
//! - [`nodes`]: assistant, retriever, grader, rewriter, web search and generator nodes.
//! - [`llm`]: `LlmClient` trait, prompt templates, `MockLlm`, and `ChatOpenAI` (feature `openai`).
//! - [`retriever`]: `DocumentRetriever`, the context formatter and an in-memory vector index.
//! - [`websearch`]: `SearchProvider`, the Tavily provider and price extraction.
//! - [`memory`]: `Checkpointer`, `MemorySaver`, `RunnableConfig`.
//!
//! ## Features
//!
//! - `openai` (default): `ChatOpenAI` and `OpenAIEmbedder` via `async-openai`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use product_assistant::{AgentConfig, AgentServices, MockLlm, ProductAgent, StaticRetriever};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let services = AgentServices::new(
//!     Arc::new(MockLlm::new("Paris")),
//!     Arc::new(StaticRetriever::empty()),
//! );
//! let agent = ProductAgent::new(services, AgentConfig::default()).unwrap();
//! let answer = agent.run("What is the capital of France?", "default").await.unwrap();
//! assert_eq!(answer, "Paris");
//! # }
//! ```

pub mod agent;
pub mod error;
pub mod graph;
pub mod llm;
pub mod memory;
pub mod message;
pub mod nodes;
pub mod retriever;
pub mod state;
pub mod websearch;

pub use agent::{AgentConfig, AgentServices, NodeKind, ProductAgent, DEFAULT_SESSION};
pub use error::AgentError;
pub use graph::{
    CompilationError, CompiledStateGraph, Next, Node, NodeMiddleware, NodeRunner, StateGraph,
    Target,
};
pub use llm::{LlmClient, LlmResponse, MockLlm, PromptTemplate};
#[cfg(feature = "openai")]
pub use llm::ChatOpenAI;
pub use memory::{
    Checkpoint, CheckpointError, CheckpointListItem, CheckpointMetadata, CheckpointSource,
    Checkpointer, MemorySaver, RunnableConfig,
};
pub use message::{Marker, Message};
pub use retriever::{
    format_records, DocumentRetriever, Embedder, InMemoryVectorRetriever, RetrievedRecord,
    RetrieverError, StaticRetriever,
};
#[cfg(feature = "openai")]
pub use retriever::OpenAIEmbedder;
pub use state::{AgentState, Grade};
pub use websearch::{SearchError, SearchProvider, TavilySearch, WebHit, WebResult, WebSearchClient};

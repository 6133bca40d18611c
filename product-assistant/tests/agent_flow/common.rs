//! Shared fakes for agent flow tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use product_assistant::websearch::SearchError;
use product_assistant::{
    AgentConfig, AgentError, AgentServices, DocumentRetriever, LlmClient, LlmResponse, Message,
    ProductAgent, RetrievedRecord, RetrieverError, SearchProvider, WebHit,
};

pub const GRADER_NEEDLE: &str = "You are a grader";
pub const REWRITER_NEEDLE: &str = "Rewrite this user query";
pub const PRODUCT_BOT_NEEDLE: &str = "EcommerceBot";
pub const DIRECT_NEEDLE: &str = "Answer the user directly";

/// Retriever returning fixed records and counting calls.
pub struct CountingRetriever {
    records: Vec<RetrievedRecord>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl CountingRetriever {
    pub fn new(records: Vec<RetrievedRecord>) -> Arc<Self> {
        Arc::new(Self {
            records,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentRetriever for CountingRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedRecord>, RetrieverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.records.clone())
    }
}

/// Retriever whose backend is down.
pub struct BrokenRetriever;

#[async_trait]
impl DocumentRetriever for BrokenRetriever {
    async fn retrieve(&self, _query: &str) -> Result<Vec<RetrievedRecord>, RetrieverError> {
        Err(RetrieverError::Backend("connection refused".into()))
    }
}

/// Search provider returning fixed hits (or an error) and recording queries.
pub struct FakeSearch {
    outcome: Result<Vec<WebHit>, String>,
    queries: Mutex<Vec<String>>,
}

impl FakeSearch {
    pub fn with_hits(hits: Vec<WebHit>) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(hits),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(error.to_string()),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for FakeSearch {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn search(&self, query: &str, _max_results: usize) -> Result<Vec<WebHit>, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.outcome.clone().map_err(SearchError::Http)
    }
}

/// LLM that answers after a delay.
pub struct SlowLlm(pub Duration);

#[async_trait]
impl LlmClient for SlowLlm {
    async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
        tokio::time::sleep(self.0).await;
        Ok(LlmResponse {
            content: "late answer".into(),
        })
    }
}

/// A store listing with the iPhone 15 price.
pub fn iphone_hit() -> WebHit {
    WebHit::new(
        "Apple iPhone 15 (128 GB) - Black",
        "Buy Apple iPhone 15 (128 GB) online at ₹64,900. Free delivery.",
        "https://store.example.in/iphone-15",
    )
}

pub fn phone_record() -> RetrievedRecord {
    RetrievedRecord::titled("Budget Phone A")
        .with_price("₹9,999")
        .with_rating("4.2")
        .with_review("Battery easily lasts a day.")
}

pub fn agent(
    llm: Arc<dyn LlmClient>,
    retriever: Arc<dyn DocumentRetriever>,
    search: Option<Arc<dyn SearchProvider>>,
    config: AgentConfig,
) -> ProductAgent {
    let mut services = AgentServices::new(llm, retriever);
    if let Some(search) = search {
        services = services.with_web_search(search);
    }
    ProductAgent::new(services, config).expect("product graph compiles")
}

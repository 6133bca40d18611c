//! Web search capability: provider trait, Tavily provider, and the client that turns raw
//! hits into one context block.

mod client;
mod price;
mod tavily;

pub use client::{
    WebSearchClient, DEFAULT_MAX_RESULTS, DEFAULT_QUERY_SUFFIX, FAILED_NO_KEY,
};
pub use price::extract_price;
pub use tavily::{TavilySearch, DEFAULT_TAVILY_ENDPOINT};

use async_trait::async_trait;
use thiserror::Error;

/// Title used when a hit has none.
pub const DEFAULT_TITLE: &str = "Web Result";

#[derive(Debug, Error)]
pub enum SearchError {
    /// Credential or endpoint missing; web search is unavailable.
    #[error("web search not configured: {0}")]
    NotConfigured(String),
    #[error("web search request failed: {0}")]
    Http(String),
    #[error("web search response could not be decoded: {0}")]
    Decode(String),
}

/// One raw result from a search provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebHit {
    pub title: Option<String>,
    pub content: String,
    pub url: String,
}

impl WebHit {
    pub fn new(title: impl Into<String>, content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: content.into(),
            url: url.into(),
        }
    }

    /// A hit with neither content nor URL carries nothing to answer from.
    pub fn is_usable(&self) -> bool {
        !self.content.trim().is_empty() || !self.url.trim().is_empty()
    }
}

/// Selected web result, ready to be rendered as context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebResult {
    pub title: String,
    pub price: Option<String>,
    pub content: String,
    pub url: String,
}

impl WebResult {
    /// `Title/Price/Details/Source` lines; the `Price` line only when a price was found.
    pub fn render(&self) -> String {
        match &self.price {
            Some(price) => format!(
                "Title: {}\nPrice: {}\nDetails: {}\nSource: {}",
                self.title, price, self.content, self.url
            ),
            None => format!(
                "Title: {}\nDetails: {}\nSource: {}",
                self.title, self.content, self.url
            ),
        }
    }
}

/// Query → raw hits from a third-party search service.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebHit>, SearchError>;
}

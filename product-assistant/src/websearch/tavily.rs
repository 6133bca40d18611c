use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::websearch::{SearchError, SearchProvider, WebHit};

pub const DEFAULT_TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

fn tavily_api_key_from_env() -> Option<String> {
    std::env::var("TAVILY_API_KEY")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn tavily_endpoint_from_env() -> Option<String> {
    std::env::var("TAVILY_ENDPOINT")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Tavily search API over `reqwest`.
#[derive(Debug, Clone)]
pub struct TavilySearch {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl TavilySearch {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: DEFAULT_TAVILY_ENDPOINT.to_string(),
        }
    }

    /// Reads `TAVILY_API_KEY` (required) and `TAVILY_ENDPOINT` (optional).
    pub fn from_env(client: reqwest::Client) -> Result<Self, SearchError> {
        let api_key = tavily_api_key_from_env()
            .ok_or_else(|| SearchError::NotConfigured("missing TAVILY_API_KEY".to_string()))?;
        let search = Self::new(client, api_key);
        Ok(match tavily_endpoint_from_env() {
            Some(endpoint) => search.with_endpoint(endpoint),
            None => search,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Debug, Deserialize)]
struct TavilySearchResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Decodes each entry on its own; entries that are not result objects are skipped.
fn hits_from_response(parsed: TavilySearchResponse) -> Vec<WebHit> {
    parsed
        .results
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<TavilyResult>(raw) {
            Ok(r) => Some(WebHit {
                title: r.title,
                content: r.content.unwrap_or_default(),
                url: r.url,
            }),
            Err(e) => {
                warn!(error = %e, "skipping malformed tavily result");
                None
            }
        })
        .collect()
}

#[async_trait]
impl SearchProvider for TavilySearch {
    fn name(&self) -> &'static str {
        "tavily"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebHit>, SearchError> {
        let body = serde_json::json!({
            "query": query,
            "max_results": max_results,
            "include_answer": false,
            "include_raw_content": false,
            "search_depth": "basic",
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_key),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::Http(format!("tavily search HTTP {status}")));
        }

        let parsed: TavilySearchResponse = resp
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;
        let hits = hits_from_response(parsed);
        debug!(hits = hits.len(), "tavily search returned");
        Ok(hits)
    }
}

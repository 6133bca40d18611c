use std::sync::Arc;

use tracing::{info, warn};

use crate::websearch::{extract_price, SearchError, SearchProvider, WebHit, WebResult, DEFAULT_TITLE};

/// Results requested per lookup.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Appended to the query before searching.
pub const DEFAULT_QUERY_SUFFIX: &str = " price in India";

/// Returned when no provider is configured.
pub const FAILED_NO_KEY: &str = "Web search failed: API key not set.";

/// Turns a query into one text block of web context.
///
/// Never fails: a missing credential or a provider fault comes back as a
/// `Web search failed: ...` text, and no usable result as an empty string. Callers decide
/// what to do with those.
#[derive(Clone)]
pub struct WebSearchClient {
    provider: Option<Arc<dyn SearchProvider>>,
    max_results: usize,
    query_suffix: String,
}

impl WebSearchClient {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider: Some(provider),
            max_results: DEFAULT_MAX_RESULTS,
            query_suffix: DEFAULT_QUERY_SUFFIX.to_string(),
        }
    }

    /// Client without a provider (no credential); every lookup reports the missing key.
    pub fn disabled() -> Self {
        Self {
            provider: None,
            max_results: DEFAULT_MAX_RESULTS,
            query_suffix: DEFAULT_QUERY_SUFFIX.to_string(),
        }
    }

    /// `Some` provider → enabled client, `None` → [`disabled`](Self::disabled).
    pub fn from_provider(provider: Option<Arc<dyn SearchProvider>>) -> Self {
        match provider {
            Some(p) => Self::new(p),
            None => Self::disabled(),
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_query_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.query_suffix = suffix.into();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Searches for `query` and renders the selected result.
    pub async fn lookup(&self, query: &str) -> String {
        let Some(provider) = &self.provider else {
            warn!("web search requested but no provider is configured");
            return FAILED_NO_KEY.to_string();
        };

        let refined = format!("{}{}", query, self.query_suffix);
        let hits = match provider.search(&refined, self.max_results).await {
            Ok(hits) => hits,
            Err(SearchError::NotConfigured(reason)) => {
                warn!(provider = provider.name(), %reason, "web search not configured");
                return FAILED_NO_KEY.to_string();
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "web search failed");
                return format!("Web search failed: {}", e);
            }
        };

        if hits.is_empty() {
            warn!(query = %refined, "web search returned no results");
            return String::new();
        }
        match Self::select_result(&hits) {
            Some(result) => {
                info!(url = %result.url, has_price = result.price.is_some(), "web result selected");
                result.render()
            }
            None => {
                warn!("web search returned results, but none were usable");
                String::new()
            }
        }
    }

    /// First hit whose content carries a price; otherwise the first usable hit without one.
    pub fn select_result(hits: &[WebHit]) -> Option<WebResult> {
        let to_result = |hit: &WebHit, price: Option<String>| WebResult {
            title: hit
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            price,
            content: hit.content.clone(),
            url: hit.url.clone(),
        };

        let usable = || hits.iter().filter(|h| h.is_usable());
        usable()
            .find_map(|hit| extract_price(&hit.content).map(|p| to_result(hit, Some(p))))
            .or_else(|| usable().next().map(|hit| to_result(hit, None)))
    }
}

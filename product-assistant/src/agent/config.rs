use std::time::Duration;

use crate::graph::DEFAULT_RECURSION_LIMIT;
use crate::websearch::{DEFAULT_MAX_RESULTS, DEFAULT_QUERY_SUFFIX};

/// Rewrite attempts allowed per run before grading is forced to accept.
pub const DEFAULT_REWRITE_CEILING: u32 = 2;

/// Wall-clock limit for one run.
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(60);

/// Tunables of a [`ProductAgent`](crate::agent::ProductAgent).
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub rewrite_ceiling: u32,
    /// `None` disables the wall-clock limit.
    pub run_timeout: Option<Duration>,
    pub recursion_limit: usize,
    pub search_max_results: usize,
    pub search_query_suffix: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            rewrite_ceiling: DEFAULT_REWRITE_CEILING,
            run_timeout: Some(DEFAULT_RUN_TIMEOUT),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            search_max_results: DEFAULT_MAX_RESULTS,
            search_query_suffix: DEFAULT_QUERY_SUFFIX.to_string(),
        }
    }
}

impl AgentConfig {
    pub fn with_rewrite_ceiling(mut self, ceiling: u32) -> Self {
        self.rewrite_ceiling = ceiling;
        self
    }

    pub fn with_run_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.run_timeout = timeout;
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn with_search_max_results(mut self, max_results: usize) -> Self {
        self.search_max_results = max_results;
        self
    }

    pub fn with_search_query_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.search_query_suffix = suffix.into();
        self
    }
}

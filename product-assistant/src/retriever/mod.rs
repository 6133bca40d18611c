//! Vector index capability.
//!
//! The controller only sees [`DocumentRetriever`]. [`InMemoryVectorRetriever`] is the bundled
//! index (embedding + cosine similarity), populated from a JSON catalog before a run;
//! [`StaticRetriever`] returns fixed records.

mod embedder;
mod format;
mod in_memory;
mod record;

pub use embedder::Embedder;
#[cfg(feature = "openai")]
pub use embedder::OpenAIEmbedder;
pub use format::{format_records, NO_DOCUMENTS, RECORD_SEPARATOR};
pub use in_memory::{InMemoryVectorRetriever, DEFAULT_TOP_K};
pub use record::RetrievedRecord;

use async_trait::async_trait;
use thiserror::Error;

/// Error from an index lookup or from loading the catalog.
#[derive(Debug, Error)]
pub enum RetrieverError {
    #[error("retrieval query must not be empty")]
    EmptyQuery,
    #[error("embedding failed: {0}")]
    Embedding(String),
    #[error("vector index error: {0}")]
    Backend(String),
    #[error("catalog error: {0}")]
    Catalog(String),
}

/// Query → ranked records.
///
/// An empty result is a normal outcome ("nothing relevant"), not an error.
#[async_trait]
pub trait DocumentRetriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedRecord>, RetrieverError>;
}

/// Returns the same records for every non-empty query.
#[derive(Debug, Clone, Default)]
pub struct StaticRetriever {
    records: Vec<RetrievedRecord>,
}

impl StaticRetriever {
    pub fn new(records: Vec<RetrievedRecord>) -> Self {
        Self { records }
    }

    /// Index with no records.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRetriever for StaticRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedRecord>, RetrieverError> {
        if query.trim().is_empty() {
            return Err(RetrieverError::EmptyQuery);
        }
        Ok(self.records.clone())
    }
}

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, info};

use crate::retriever::{DocumentRetriever, Embedder, RetrievedRecord, RetrieverError};

/// Records returned per query unless overridden.
pub const DEFAULT_TOP_K: usize = 10;

/// Pure in-memory vector index over product records.
///
/// **Interaction**: Used as `Arc<dyn DocumentRetriever>` by the retriever node; filled by
/// [`ingest`](Self::ingest) or [`load_catalog`](Self::load_catalog) before runs start.
///
/// **In-Memory**: All data stored in memory, lost when the index is dropped.
pub struct InMemoryVectorRetriever {
    data: DashMap<usize, VectorEntry>,
    next_id: AtomicUsize,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

#[derive(Clone)]
struct VectorEntry {
    vector: Vec<f32>,
    record: RetrievedRecord,
}

impl InMemoryVectorRetriever {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            data: DashMap::new(),
            next_id: AtomicUsize::new(0),
            embedder,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Caps the number of records per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Embeds and stores `records`; returns how many were added.
    pub async fn ingest(&self, records: Vec<RetrievedRecord>) -> Result<usize, RetrieverError> {
        if records.is_empty() {
            return Ok(0);
        }
        let texts: Vec<String> = records.iter().map(RetrievedRecord::embedding_text).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let vectors = self.embedder.embed(&refs).await?;
        if vectors.len() != records.len() {
            return Err(RetrieverError::Embedding(format!(
                "expected {} vectors, got {}",
                records.len(),
                vectors.len()
            )));
        }

        let added = records.len();
        for (record, vector) in records.into_iter().zip(vectors) {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            self.data.insert(id, VectorEntry { vector, record });
        }
        debug!(added, total = self.data.len(), "records ingested");
        Ok(added)
    }

    /// Reads a JSON array of records from `path` and ingests it.
    pub async fn load_catalog(&self, path: impl AsRef<Path>) -> Result<usize, RetrieverError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RetrieverError::Catalog(format!("{}: {}", path.display(), e)))?;
        let records: Vec<RetrievedRecord> = serde_json::from_str(&raw)
            .map_err(|e| RetrieverError::Catalog(format!("{}: {}", path.display(), e)))?;
        let added = self.ingest(records).await?;
        info!(path = %path.display(), added, "catalog loaded");
        Ok(added)
    }

    /// Cosine similarity; 0.0 if either vector has zero magnitude.
    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            0.0
        } else {
            dot_product / (norm_a * norm_b)
        }
    }
}

#[async_trait]
impl DocumentRetriever for InMemoryVectorRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedRecord>, RetrieverError> {
        if query.trim().is_empty() {
            return Err(RetrieverError::EmptyQuery);
        }
        if self.data.is_empty() {
            return Ok(Vec::new());
        }

        let query_vec = self
            .embedder
            .embed(&[query])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RetrieverError::Embedding("no vector returned".into()))?;

        let mut scored: Vec<(usize, f32)> = self
            .data
            .iter()
            .map(|entry| (*entry.key(), Self::cosine_similarity(&query_vec, &entry.vector)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(self.top_k);

        Ok(scored
            .into_iter()
            .filter_map(|(id, _)| self.data.get(&id).map(|e| e.record.clone()))
            .collect())
    }
}

//! Text → vector capability used by the in-memory index.

use async_trait::async_trait;

use crate::retriever::RetrieverError;

/// Embeds a batch of texts; the output has one vector per input, in order.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, RetrieverError>;
}

#[cfg(feature = "openai")]
mod openai {
    use async_openai::{
        config::OpenAIConfig, types::embeddings::CreateEmbeddingRequestArgs, Client,
    };
    use async_trait::async_trait;

    use super::Embedder;
    use crate::retriever::RetrieverError;

    /// Embeddings from an OpenAI-compatible `/embeddings` endpoint.
    pub struct OpenAIEmbedder {
        client: Client<OpenAIConfig>,
        model: String,
    }

    impl OpenAIEmbedder {
        /// Default config (API key from `OPENAI_API_KEY`).
        pub fn new(model: impl Into<String>) -> Self {
            Self {
                client: Client::new(),
                model: model.into(),
            }
        }

        pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
            Self {
                client: Client::with_config(config),
                model: model.into(),
            }
        }
    }

    #[async_trait]
    impl Embedder for OpenAIEmbedder {
        async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, RetrieverError> {
            if texts.is_empty() {
                return Ok(Vec::new());
            }
            let input: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
            let request = CreateEmbeddingRequestArgs::default()
                .model(self.model.clone())
                .input(input)
                .build()
                .map_err(|e| RetrieverError::Embedding(format!("request build failed: {}", e)))?;

            let response = self
                .client
                .embeddings()
                .create(request)
                .await
                .map_err(|e| RetrieverError::Embedding(e.to_string()))?;

            let mut data = response.data;
            data.sort_by_key(|d| d.index);
            if data.len() != texts.len() {
                return Err(RetrieverError::Embedding(format!(
                    "expected {} vectors, got {}",
                    texts.len(),
                    data.len()
                )));
            }
            Ok(data.into_iter().map(|d| d.embedding).collect())
        }
    }
}

#[cfg(feature = "openai")]
pub use openai::OpenAIEmbedder;

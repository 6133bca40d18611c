//! Run config: OpenAI endpoint and model, embeddings, catalog, session and run limits.
//! Filled from env / .env, then overridden by [`RunOptions`](super::RunOptions).

use std::path::PathBuf;
use std::time::Duration;

use async_openai::config::OpenAIConfig;
use product_assistant::{AgentConfig, ChatOpenAI, OpenAIEmbedder, DEFAULT_SESSION};

use super::RunOptions;

/// Error type used for config loading and runs.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

#[derive(Clone, Debug)]
pub struct RunConfig {
    /// OpenAI API base URL, e.g. `https://api.openai.com/v1`.
    pub api_base: String,
    pub api_key: String,
    /// Model name, e.g. `gpt-4o-mini`.
    pub model: String,
    /// Sampling temperature 0-2. Default: unset (use API default).
    pub temperature: Option<f32>,
    /// Embeddings API key. If not set, uses OPENAI_API_KEY.
    pub embedding_api_key: Option<String>,
    /// Embeddings API base URL. If not set, uses OPENAI_API_BASE.
    pub embedding_api_base: Option<String>,
    pub embedding_model: String,
    /// JSON catalog loaded into the in-memory index. Without it the index is empty.
    pub catalog_path: Option<PathBuf>,
    /// Session id (checkpoint thread).
    pub thread_id: String,
    /// `None` runs without a wall-clock limit.
    pub run_timeout: Option<Duration>,
    pub rewrite_ceiling: u32,
    /// When true, node enter/exit is logged.
    pub verbose: bool,
}

impl RunConfig {
    /// Fill config from env vars. Call `dotenv::dotenv().ok()` first to include `.env`.
    ///
    /// `OPENAI_API_KEY` required; `OPENAI_API_BASE`, `OPENAI_MODEL`, `EMBEDDING_MODEL`,
    /// `THREAD_ID`, `RUN_TIMEOUT_SECS`, `REWRITE_CEILING` have defaults.
    /// `OPENAI_TEMPERATURE`, `EMBEDDING_API_KEY`, `EMBEDDING_API_BASE`, `CATALOG_PATH` optional.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "OPENAI_API_KEY is not set; please configure it in .env",
            )
        })?;
        let api_base =
            std::env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let temperature = match std::env::var("OPENAI_TEMPERATURE") {
            Ok(s) => Some(s.trim().parse::<f32>().map_err(|_| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("OPENAI_TEMPERATURE must be a number, got {:?}", s),
                )
            })?),
            Err(_) => None,
        };
        let embedding_api_key = std::env::var("EMBEDDING_API_KEY").ok();
        let embedding_api_base = std::env::var("EMBEDDING_API_BASE").ok();
        let embedding_model = std::env::var("EMBEDDING_MODEL")
            .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string());
        let catalog_path = std::env::var("CATALOG_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let thread_id = std::env::var("THREAD_ID").unwrap_or_else(|_| DEFAULT_SESSION.to_string());
        let run_timeout = match std::env::var("RUN_TIMEOUT_SECS") {
            Ok(s) => timeout_from_secs(s.trim().parse().map_err(|_| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("RUN_TIMEOUT_SECS must be a whole number of seconds, got {:?}", s),
                )
            })?),
            Err(_) => AgentConfig::default().run_timeout,
        };
        let rewrite_ceiling = match std::env::var("REWRITE_CEILING") {
            Ok(s) => s.trim().parse().map_err(|_| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("REWRITE_CEILING must be a non-negative integer, got {:?}", s),
                )
            })?,
            Err(_) => AgentConfig::default().rewrite_ceiling,
        };

        Ok(Self {
            api_base,
            api_key,
            model,
            temperature,
            embedding_api_key,
            embedding_api_base,
            embedding_model,
            catalog_path,
            thread_id,
            run_timeout,
            rewrite_ceiling,
            verbose: false,
        })
    }

    /// Apply optional overrides from `RunOptions`; only set fields override.
    pub fn apply_options(&mut self, options: &RunOptions) {
        if let Some(session) = &options.session {
            self.thread_id = session.clone();
        }
        if let Some(catalog) = &options.catalog {
            self.catalog_path = Some(catalog.clone());
        }
        if let Some(secs) = options.timeout_secs {
            self.run_timeout = timeout_from_secs(secs);
        }
        self.verbose = options.verbose;
    }

    /// Get the effective embedding API key (falls back to OPENAI_API_KEY if not set).
    pub fn embedding_api_key(&self) -> &str {
        self.embedding_api_key.as_deref().unwrap_or(&self.api_key)
    }

    /// Get the effective embedding API base URL (falls back to OPENAI_API_BASE if not set).
    pub fn embedding_api_base(&self) -> &str {
        self.embedding_api_base.as_deref().unwrap_or(&self.api_base)
    }

    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig::default()
            .with_rewrite_ceiling(self.rewrite_ceiling)
            .with_run_timeout(self.run_timeout)
    }

    pub fn create_llm(&self) -> ChatOpenAI {
        let openai_config = OpenAIConfig::new()
            .with_api_base(&self.api_base)
            .with_api_key(self.api_key.clone());
        let llm = ChatOpenAI::with_config(openai_config, self.model.clone());
        match self.temperature {
            Some(t) => llm.with_temperature(t),
            None => llm,
        }
    }

    pub fn create_embedder(&self) -> OpenAIEmbedder {
        let openai_config = OpenAIConfig::new()
            .with_api_key(self.embedding_api_key())
            .with_api_base(self.embedding_api_base());
        OpenAIEmbedder::with_config(openai_config, self.embedding_model.clone())
    }
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

//! Run entry points: run with env config, with option overrides, or with an explicit config.
//!
//! [`build_agent`] wires the concrete services: `ChatOpenAI`, an in-memory vector index
//! filled from the catalog, and Tavily when `TAVILY_API_KEY` is set.

pub use crate::config::Error;

use std::sync::Arc;

use product_assistant::{
    AgentServices, DocumentRetriever, InMemoryVectorRetriever, ProductAgent, SearchProvider,
    StaticRetriever, TavilySearch,
};
use tracing::{info, warn};

use crate::config::{RunConfig, RunOptions};
use crate::middleware::LoggingMiddleware;

/// Answers `user_message` with config from env (and `.env`).
pub async fn run(user_message: &str) -> Result<String, Error> {
    dotenv::dotenv().ok();
    let config = RunConfig::from_env()?;
    run_with_config(&config, user_message).await
}

/// Loads `.env`, builds `RunConfig` from env, applies `options`, then runs.
pub async fn run_with_options(user_message: &str, options: &RunOptions) -> Result<String, Error> {
    dotenv::dotenv().ok();
    let mut config = RunConfig::from_env()?;
    config.apply_options(options);
    run_with_config(&config, user_message).await
}

/// Runs with the given config; does not read `.env`.
pub async fn run_with_config(config: &RunConfig, user_message: &str) -> Result<String, Error> {
    let agent = build_agent(config).await?;
    ask(&agent, config, user_message).await
}

/// Builds the agent with the services described by `config`.
pub async fn build_agent(config: &RunConfig) -> Result<ProductAgent, Error> {
    let retriever: Arc<dyn DocumentRetriever> = match &config.catalog_path {
        Some(path) => {
            let index = InMemoryVectorRetriever::new(Arc::new(config.create_embedder()));
            index.load_catalog(path).await?;
            Arc::new(index)
        }
        None => {
            warn!("CATALOG_PATH not set; product index is empty");
            Arc::new(StaticRetriever::empty())
        }
    };

    let web_search: Option<Arc<dyn SearchProvider>> =
        match TavilySearch::from_env(reqwest::Client::new()) {
            Ok(tavily) => Some(Arc::new(tavily)),
            Err(e) => {
                warn!(error = %e, "web search disabled");
                None
            }
        };

    let mut services = AgentServices::new(Arc::new(config.create_llm()), retriever);
    services.web_search = web_search;
    agent_from_services(config, services)
}

/// Compiles the agent for `services`, attaching node logging when `config.verbose`.
pub(crate) fn agent_from_services(
    config: &RunConfig,
    services: AgentServices,
) -> Result<ProductAgent, Error> {
    let agent = if config.verbose {
        ProductAgent::with_middleware(services, config.agent_config(), Arc::new(LoggingMiddleware))?
    } else {
        ProductAgent::new(services, config.agent_config())?
    };
    Ok(agent)
}

pub(crate) async fn ask(
    agent: &ProductAgent,
    config: &RunConfig,
    user_message: &str,
) -> Result<String, Error> {
    info!(session = %config.thread_id, model = %config.model, "asking product assistant");
    let answer = agent.run(user_message, &config.thread_id).await?;
    Ok(answer)
}

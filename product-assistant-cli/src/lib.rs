//! product-assistant-cli library: configuration and one-shot run logic for the binary.
//!
//! Reads OpenAI / Tavily / catalog settings from the environment (and `.env`), wires the
//! concrete services into a [`ProductAgent`](product_assistant::ProductAgent) and returns
//! the answer text.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), product_assistant_cli::Error> {
//! let answer = product_assistant_cli::run("What is the price of iPhone 15?").await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

mod config;
mod logging;
mod middleware;
mod run;

pub use config::{Error, RunConfig, RunOptions};
pub use logging::init_tracing;
pub use middleware::LoggingMiddleware;
pub use run::{build_agent, run, run_with_config, run_with_options};

#[cfg(test)]
mod tests;

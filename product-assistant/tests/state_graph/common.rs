//! Shared types for state graph tests.

use async_trait::async_trait;
use product_assistant::{AgentError, Next, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    A,
    B,
    C,
}

/// Adds one to the state.
pub struct Inc(pub Step);

#[async_trait]
impl Node<u32, Step> for Inc {
    fn id(&self) -> Step {
        self.0
    }

    async fn run(&self, state: u32) -> Result<(u32, Next<Step>), AgentError> {
        Ok((state + 1, Next::Continue))
    }
}

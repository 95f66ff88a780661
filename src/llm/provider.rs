use async_trait::async_trait;
use crate::error::Result;

/// How much structure to demand from the model runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Send one prompt and return the raw generated text.
    async fn generate(&self, model: &str, prompt: &str, mode: OutputMode) -> Result<String>;
    fn name(&self) -> &str;
}

//! LLM provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM text completion. Both answer generation and route
/// classification go through `complete`; prompts are built by the caller.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Submit a prompt and return the model's literal response text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier in use
    fn model(&self) -> &str;
}

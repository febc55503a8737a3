//! Provider abstractions for embeddings, LLM completion, and reference lookup
//!
//! Trait seams keep the application state an explicit context object: the
//! server wires HTTP-backed implementations at startup, tests inject stubs.

pub mod chat;
pub mod embedding;
pub mod llm;
pub mod lookup;
pub mod ollama;
pub mod wikipedia;

pub use chat::ChatCompletionsLlm;
pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use lookup::ReferenceLookup;
pub use ollama::OllamaEmbedder;
pub use wikipedia::WikipediaLookup;

use std::time::Duration;
use tokio::time::sleep;

use crate::error::{Error, Result};

/// Retry an async operation with exponential backoff.
pub(crate) async fn retry_with_backoff<F, Fut, T>(max_retries: u32, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut last_error = None;

    for attempt in 0..=max_retries {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                last_error = Some(e);
                if attempt < max_retries {
                    let delay = Duration::from_secs(2u64.pow(attempt));
                    tracing::warn!(
                        "Request failed (attempt {}/{}), retrying in {:?}",
                        attempt + 1,
                        max_retries + 1,
                        delay
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::internal("retry loop without attempts")))
}

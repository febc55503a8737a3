//! Reference lookup provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for external encyclopedia-style reference lookup
#[async_trait]
pub trait ReferenceLookup: Send + Sync {
    /// Fetch a short text summary for a query
    async fn summarize(&self, query: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

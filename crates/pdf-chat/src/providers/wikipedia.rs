//! Encyclopedia lookup via the MediaWiki search API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::WikiConfig;
use crate::error::{Error, Result};

use super::lookup::ReferenceLookup;

const USER_AGENT: &str = concat!("pdf-chat/", env!("CARGO_PKG_VERSION"));

/// Reference lookup backed by the MediaWiki search API: the top search hits
/// with their intro extracts, joined and capped to a maximum length.
pub struct WikipediaLookup {
    client: Client,
    config: WikiConfig,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    query: Option<QueryBody>,
}

#[derive(Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: HashMap<String, WikiPage>,
}

#[derive(Deserialize)]
struct WikiPage {
    title: String,
    #[serde(default)]
    extract: String,
    /// Search rank assigned by the generator
    #[serde(default)]
    index: Option<i64>,
}

impl WikipediaLookup {
    /// Create a new lookup client
    pub fn new(config: &WikiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl ReferenceLookup for WikipediaLookup {
    async fn summarize(&self, query: &str) -> Result<String> {
        let limit = self.config.top_k_results.to_string();
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", &limit),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("exlimit", "max"),
                ("redirects", "1"),
            ])
            .send()
            .await
            .map_err(|e| Error::Lookup(format!("Encyclopedia request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Lookup(format!(
                "Encyclopedia lookup failed: HTTP {}",
                response.status()
            )));
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Lookup(format!("Failed to parse lookup response: {}", e)))?;

        let mut pages: Vec<WikiPage> = body
            .query
            .map(|q| q.pages.into_values().collect())
            .unwrap_or_default();

        if pages.is_empty() {
            return Ok(format!("No encyclopedia results were found for \"{}\".", query));
        }

        pages.sort_by_key(|p| p.index.unwrap_or(i64::MAX));

        let joined = pages
            .iter()
            .filter(|p| !p.extract.trim().is_empty())
            .map(|p| format!("Page: {}\nSummary: {}", p.title, p.extract.trim()))
            .collect::<Vec<_>>()
            .join("\n\n");

        if joined.is_empty() {
            return Ok(format!("No encyclopedia results were found for \"{}\".", query));
        }

        Ok(truncate_chars(&joined, self.config.doc_content_chars_max))
    }

    fn name(&self) -> &str {
        "wikipedia"
    }
}

/// Truncate to at most `max` characters on a character boundary
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    text.chars().take(max).collect()
}

//! Gateway HTTP client for the front-end process
//!
//! The front-end and back-end run as two independent processes over
//! loopback HTTP. This client wraps that boundary with an explicit request
//! timeout and a bounded retry policy with exponential backoff; exhaustion
//! surfaces a typed error rather than hanging the caller.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::GatewayClientConfig;
use crate::error::{Error, Result};
use crate::providers::retry_with_backoff;
use crate::types::{AnswerRequest, AnswerResponse, Item, ItemResponse, RoutedAnswerResponse};

/// HTTP client for the answer gateway
pub struct GatewayClient {
    client: Client,
    config: GatewayClientConfig,
}

impl GatewayClient {
    /// Create a new gateway client
    pub fn new(config: &GatewayClientConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
        }
    }

    /// `POST /AI_Answer/`: answer directly from the supplied context
    pub async fn ai_answer(&self, query: &str, context: &str) -> Result<AnswerResponse> {
        self.post("/AI_Answer/", &AnswerRequest::new(query, context))
            .await
    }

    /// `POST /Smart_AI_Answer/`: answer with routing across the three paths
    pub async fn smart_ai_answer(&self, query: &str, context: &str) -> Result<RoutedAnswerResponse> {
        self.post("/Smart_AI_Answer/", &AnswerRequest::new(query, context))
            .await
    }

    /// `POST /items/`: demo item echo
    pub async fn create_item(&self, name: &str, description: &str) -> Result<ItemResponse> {
        self.post(
            "/items/",
            &Item {
                name: name.to_string(),
                description: description.to_string(),
            },
        )
        .await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Clone + Send + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let client = self.client.clone();
        let body = body.clone();

        retry_with_backoff(self.config.max_retries, || {
            let url = url.clone();
            let client = client.clone();
            let body = body.clone();

            async move {
                let response = client
                    .post(&url)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| Error::internal(format!("Gateway request failed: {}", e)))?;

                let status = response.status();
                if !status.is_success() {
                    let text = response.text().await.unwrap_or_default();
                    return Err(Error::internal(format!(
                        "Gateway returned HTTP {}: {}",
                        status, text
                    )));
                }

                response
                    .json::<T>()
                    .await
                    .map_err(|e| Error::internal(format!("Invalid gateway response: {}", e)))
            }
        })
        .await
    }
}

//! Gateway tests driving the router directly with stub providers

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use pdf_chat::config::AppConfig;
use pdf_chat::error::Result;
use pdf_chat::index::VectorIndex;
use pdf_chat::providers::{EmbeddingProvider, LlmProvider, ReferenceLookup};
use pdf_chat::server::state::AppState;
use pdf_chat::server::PdfChatServer;
use pdf_chat::types::Chunk;

/// Stub LLM: answers the routing prompt with a fixed label and every other
/// prompt with a fixed answer.
struct StubLlm {
    route_label: &'static str,
    answer: &'static str,
}

#[async_trait]
impl LlmProvider for StubLlm {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if prompt.contains("routing classifier") {
            Ok(self.route_label.to_string())
        } else {
            Ok(self.answer.to_string())
        }
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub"
    }
}

struct StubEmbedder;

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut v = vec![0.0f32; 26];
        for c in text.to_lowercase().chars() {
            if c.is_ascii_lowercase() {
                v[(c as u8 - b'a') as usize] += 1.0;
            }
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        26
    }

    fn name(&self) -> &str {
        "stub"
    }
}

struct StubLookup;

#[async_trait]
impl ReferenceLookup for StubLookup {
    async fn summarize(&self, query: &str) -> Result<String> {
        Ok(format!("Encyclopedia summary for: {}", query))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

struct TestGateway {
    router: axum::Router,
    _dir: tempfile::TempDir,
}

async fn gateway(route_label: &'static str, index_chunks: &[&str]) -> TestGateway {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.index.storage_path = dir.path().join("index.json");

    let index = Arc::new(VectorIndex::open(config.index.storage_path.clone()));
    if !index_chunks.is_empty() {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(StubEmbedder);
        let chunks: Vec<Chunk> = index_chunks
            .iter()
            .enumerate()
            .map(|(i, t)| Chunk::new(t.to_string(), 0, t.chars().count(), i as u32))
            .collect();
        index.rebuild(chunks, &embedder).await.unwrap();
    }

    let state = AppState::with_providers(
        config.clone(),
        Arc::new(StubLlm {
            route_label,
            answer: "Sound is a mechanical wave.",
        }),
        Arc::new(StubEmbedder),
        Arc::new(StubLookup),
        index,
    );

    TestGateway {
        router: PdfChatServer::with_state(config, state).build_router(),
        _dir: dir,
    }
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn ai_answer_returns_a_message_for_extracted_context() {
    let gw = gateway("AI_Response", &[]).await;

    let response = gw
        .router
        .oneshot(post_json(
            "/AI_Answer/",
            serde_json::json!({
                "query": "What is sound?",
                "context": "Sound is a mechanical wave."
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Sound is a mechanical wave.");
}

#[tokio::test]
async fn smart_answer_reports_the_ai_response_path_for_salutations() {
    let gw = gateway("AI_Response", &[]).await;

    let response = gw
        .router
        .oneshot(post_json(
            "/Smart_AI_Answer/",
            serde_json::json!({ "query": "Hello", "context": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["path"], "AI_Response");
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn smart_answer_reports_the_vectorstore_path_for_domain_questions() {
    let gw = gateway("Vectorstore", &["Sound is a mechanical wave."]).await;

    let response = gw
        .router
        .oneshot(post_json(
            "/Smart_AI_Answer/",
            serde_json::json!({ "query": "What is sound?", "context": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["path"], "Vectorstore");
    assert_eq!(body["message"], "Sound is a mechanical wave.");
}

#[tokio::test]
async fn smart_answer_reports_the_wiki_search_path_for_out_of_domain_questions() {
    let gw = gateway("Wiki Search", &[]).await;

    let response = gw
        .router
        .oneshot(post_json(
            "/Smart_AI_Answer/",
            serde_json::json!({ "query": "Who was Napoleon?", "context": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["path"], "Wiki Search");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Who was Napoleon?"));
}

#[tokio::test]
async fn malformed_classifier_output_surfaces_as_a_server_error() {
    let gw = gateway("probably the Vectorstore one", &[]).await;

    let response = gw
        .router
        .oneshot(post_json(
            "/Smart_AI_Answer/",
            serde_json::json!({ "query": "What is sound?", "context": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"]["type"], "routing_error");
}

#[tokio::test]
async fn items_endpoint_echoes_the_item() {
    let gw = gateway("AI_Response", &[]).await;

    let response = gw
        .router
        .oneshot(post_json(
            "/items/",
            serde_json::json!({ "name": "Yash", "description": "Jaiswal" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["message"],
        "Item 'Yash' created with description: 'Jaiswal'"
    );
}

#[tokio::test]
async fn health_endpoint_responds() {
    let gw = gateway("AI_Response", &[]).await;

    let response = gw
        .router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_api_key_refuses_to_start() {
    let mut config = AppConfig::default();
    config.llm.api_key_env = "PDF_CHAT_GATEWAY_TEST_KEY_UNSET".to_string();

    let err = PdfChatServer::new(config).unwrap_err();
    assert!(err.to_string().contains("PDF_CHAT_GATEWAY_TEST_KEY_UNSET"));
}

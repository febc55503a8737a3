//! Answering service: direct and routed question answering

use std::sync::Arc;

use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::index::VectorIndex;
use crate::providers::{EmbeddingProvider, LlmProvider, ReferenceLookup};
use crate::routing::{AnswerRouter, RoutePath};

/// A routed answer: the path that produced it plus the answer text
#[derive(Debug, Clone)]
pub struct RoutedAnswer {
    pub path: RoutePath,
    pub message: String,
}

/// Orchestrates the three answering paths over the provider seams.
/// Exactly one path runs per question; failures are terminal for that
/// question only.
pub struct AnswerService {
    llm: Arc<dyn LlmProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    lookup: Arc<dyn ReferenceLookup>,
    index: Arc<VectorIndex>,
    router: AnswerRouter,
    top_k: usize,
}

impl AnswerService {
    /// Create the service from its collaborators
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        lookup: Arc<dyn ReferenceLookup>,
        index: Arc<VectorIndex>,
        domain_description: impl Into<String>,
        top_k: usize,
    ) -> Self {
        let router = AnswerRouter::new(Arc::clone(&llm), domain_description);
        Self {
            llm,
            embedder,
            lookup,
            index,
            router,
            top_k,
        }
    }

    /// Answer directly from the caller-supplied context. The model's
    /// response text is returned unmodified.
    pub async fn direct_answer(&self, question: &str, context: &str) -> Result<String> {
        let prompt = PromptBuilder::build_qa_prompt(question, context);
        self.llm.complete(&prompt).await
    }

    /// Answer grounded in vector-store retrieval: embed the question,
    /// retrieve the top-k chunks, and answer over the built context.
    pub async fn vectorstore_answer(&self, question: &str) -> Result<String> {
        self.index.refresh()?;
        let hits = self.index.query(question, self.top_k, &self.embedder).await?;
        let context = PromptBuilder::build_context(&hits);
        let prompt = PromptBuilder::build_qa_prompt(question, &context);
        self.llm.complete(&prompt).await
    }

    /// Route the question, then answer via the selected path.
    pub async fn routed_answer(&self, question: &str, context: &str) -> Result<RoutedAnswer> {
        let path = self.router.route(question).await?;

        let message = match path {
            RoutePath::AiResponse => self.direct_answer(question, context).await?,
            RoutePath::Vectorstore => self.vectorstore_answer(question).await?,
            RoutePath::WikiSearch => self.lookup.summarize(question).await?,
        };

        Ok(RoutedAnswer { path, message })
    }

    /// The vector index backing the vector-store path
    pub fn index(&self) -> &Arc<VectorIndex> {
        &self.index
    }

    /// The embedding provider
    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;

    /// Stub LLM that answers the routing prompt with a fixed label and
    /// every other prompt with a fixed answer.
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
        async fn summarize(&self, _query: &str) -> Result<String> {
            Ok("Napoleon was Emperor of the French.".to_string())
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn service(route_label: &'static str, index: Arc<VectorIndex>) -> AnswerService {
        AnswerService::new(
            Arc::new(StubLlm {
                route_label,
                answer: "Sound is a mechanical wave.",
            }),
            Arc::new(StubEmbedder),
            Arc::new(StubLookup),
            index,
            "documents about sound",
            4,
        )
    }

    fn empty_index(dir: &tempfile::TempDir) -> Arc<VectorIndex> {
        Arc::new(VectorIndex::open(dir.path().join("index.json")))
    }

    #[tokio::test]
    async fn direct_answer_returns_the_model_text_unmodified() {
        let dir = tempfile::tempdir().unwrap();
        let service = service("AI_Response", empty_index(&dir));
        let answer = service
            .direct_answer("What is sound?", "Sound is a mechanical wave.")
            .await
            .unwrap();
        assert_eq!(answer, "Sound is a mechanical wave.");
    }

    #[tokio::test]
    async fn ai_response_label_routes_to_the_direct_path() {
        let dir = tempfile::tempdir().unwrap();
        let service = service("AI_Response", empty_index(&dir));
        let routed = service.routed_answer("Hello", "").await.unwrap();
        assert_eq!(routed.path, RoutePath::AiResponse);
        assert!(!routed.message.is_empty());
    }

    #[tokio::test]
    async fn wiki_search_label_routes_to_the_lookup_path() {
        let dir = tempfile::tempdir().unwrap();
        let service = service("Wiki Search", empty_index(&dir));
        let routed = service.routed_answer("Who was Napoleon?", "").await.unwrap();
        assert_eq!(routed.path, RoutePath::WikiSearch);
        assert_eq!(routed.message, "Napoleon was Emperor of the French.");
    }

    #[tokio::test]
    async fn vectorstore_label_routes_through_the_index() {
        let dir = tempfile::tempdir().unwrap();
        let index = empty_index(&dir);
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(StubEmbedder);
        index
            .rebuild(
                vec![crate::types::Chunk::new(
                    "Sound is a mechanical wave.".to_string(),
                    0,
                    27,
                    0,
                )],
                &embedder,
            )
            .await
            .unwrap();

        let service = service("Vectorstore", index);
        let routed = service.routed_answer("What is sound?", "").await.unwrap();
        assert_eq!(routed.path, RoutePath::Vectorstore);
        assert_eq!(routed.message, "Sound is a mechanical wave.");
    }

    #[tokio::test]
    async fn vectorstore_route_without_an_index_fails_the_request() {
        let dir = tempfile::tempdir().unwrap();
        let service = service("Vectorstore", empty_index(&dir));
        let err = service.routed_answer("What is sound?", "").await.unwrap_err();
        assert!(matches!(err, Error::Index(_)));
    }

    #[tokio::test]
    async fn malformed_classifier_output_fails_without_a_fallback_route() {
        let dir = tempfile::tempdir().unwrap();
        let service = service("I think Vectorstore fits best", empty_index(&dir));
        let err = service.routed_answer("What is sound?", "").await.unwrap_err();
        assert!(matches!(err, Error::Routing(_)));
    }
}

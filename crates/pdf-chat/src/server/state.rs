//! Application state for the gateway
//!
//! An explicit context object constructed once at startup and handed to
//! every handler; there are no ambient globals or module-level singletons.

use std::sync::Arc;

use crate::answer::AnswerService;
use crate::config::AppConfig;
use crate::error::Result;
use crate::index::VectorIndex;
use crate::providers::{
    ChatCompletionsLlm, EmbeddingProvider, LlmProvider, OllamaEmbedder, ReferenceLookup,
    WikipediaLookup,
};
use crate::session::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Answering service over the provider seams
    service: AnswerService,
    /// Vector index (shared with the service)
    index: Arc<VectorIndex>,
    /// Per-session state for front-end callers
    sessions: SessionStore,
}

impl AppState {
    /// Create the application state with HTTP-backed providers.
    ///
    /// Fails when the LLM API-key environment variable is absent, so the
    /// process refuses to start instead of crashing mid-request.
    pub fn new(config: AppConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let llm: Arc<dyn LlmProvider> = Arc::new(ChatCompletionsLlm::new(&config.llm)?);
        tracing::info!("LLM provider initialized (model: {})", config.llm.model);

        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OllamaEmbedder::new(&config.embeddings));
        tracing::info!(
            "Embedding provider initialized (model: {}, {} dimensions)",
            config.embeddings.model,
            config.embeddings.dimensions
        );

        let lookup: Arc<dyn ReferenceLookup> = Arc::new(WikipediaLookup::new(&config.wiki));

        let index = Arc::new(VectorIndex::open(config.index.storage_path.clone()));

        Ok(Self::with_providers(config, llm, embedder, lookup, index))
    }

    /// Create the application state with explicit providers (used by tests
    /// and by embedders that bring their own backends).
    pub fn with_providers(
        config: AppConfig,
        llm: Arc<dyn LlmProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        lookup: Arc<dyn ReferenceLookup>,
        index: Arc<VectorIndex>,
    ) -> Self {
        let service = AnswerService::new(
            llm,
            embedder,
            lookup,
            Arc::clone(&index),
            config.router.domain_description.clone(),
            config.index.top_k,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                service,
                index,
                sessions: SessionStore::new(),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the answering service
    pub fn service(&self) -> &AnswerService {
        &self.inner.service
    }

    /// Get the vector index
    pub fn index(&self) -> &Arc<VectorIndex> {
        &self.inner.index
    }

    /// Get the session store
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }
}

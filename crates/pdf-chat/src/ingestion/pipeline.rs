//! Ingestion pipeline orchestration: extract, chunk, embed, publish

use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::index::VectorIndex;
use crate::providers::EmbeddingProvider;
use crate::types::Chunk;

use super::chunker::TextChunker;
use super::extractor::{PdfExtractor, PdfFile, SkippedFile};

/// Result of processing a batch of uploaded PDFs
#[derive(Debug, Clone)]
pub struct IngestSummary {
    /// The concatenated extracted text, in upload order. Returned so the
    /// caller can keep it as per-session context for direct answering.
    pub text: String,
    /// SHA-256 of the extracted text
    pub content_hash: String,
    /// Number of chunks indexed
    pub chunk_count: usize,
    /// Files that failed to parse and were skipped
    pub skipped: Vec<SkippedFile>,
}

/// Full ingestion pipeline: extract → chunk → embed → publish index.
///
/// Rebuilding fully replaces any prior index; there are no incremental
/// update semantics.
pub struct DocumentPipeline {
    chunker: TextChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<VectorIndex>,
}

impl DocumentPipeline {
    /// Create a pipeline from configuration and collaborators
    pub fn new(
        config: &AppConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<VectorIndex>,
    ) -> Self {
        Self {
            chunker: TextChunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap),
            embedder,
            index,
        }
    }

    /// Process uploaded PDFs into a freshly built index.
    ///
    /// Per-file extraction failures are reported in the summary and do not
    /// abort the run. An empty overall corpus is a recoverable error raised
    /// before any index work, leaving prior index state untouched.
    pub async fn process(&self, files: &[PdfFile]) -> Result<IngestSummary> {
        let corpus = PdfExtractor::extract_all(files);

        if corpus.text.trim().is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let spans = self.chunker.split(&corpus.text);
        let chunks: Vec<Chunk> = spans
            .into_iter()
            .enumerate()
            .map(|(i, span)| Chunk::new(span.text, span.char_start, span.char_end, i as u32))
            .collect();

        let chunk_count = chunks.len();
        tracing::info!(
            "Extracted {} characters into {} chunks ({} files skipped)",
            corpus.text.chars().count(),
            chunk_count,
            corpus.skipped.len()
        );

        self.index.rebuild(chunks, &self.embedder).await?;

        let mut hasher = Sha256::new();
        hasher.update(corpus.text.as_bytes());

        Ok(IngestSummary {
            content_hash: format!("{:x}", hasher.finalize()),
            text: corpus.text,
            chunk_count,
            skipped: corpus.skipped,
        })
    }
}

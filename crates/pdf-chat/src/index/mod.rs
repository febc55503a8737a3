//! Persisted vector index with cosine similarity search
//!
//! The index is a JSON snapshot of embedded chunks, rebuilt wholesale on
//! every reprocessing run. A rebuild embeds every chunk before anything is
//! written, then publishes atomically (tempfile + rename) so readers never
//! observe a half-built index and a failed rebuild leaves the previous
//! snapshot untouched on disk and in memory.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;
use crate::types::Chunk;

/// A retrieved chunk with its similarity to the query
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Cosine similarity (-1.0 to 1.0, higher is more similar)
    pub similarity: f32,
}

/// On-disk snapshot format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexSnapshot {
    /// Embedding dimensions, fixed for the whole snapshot
    dimensions: usize,
    /// SHA-256 of the source corpus this snapshot was built from
    content_hash: String,
    /// Build timestamp
    built_at: DateTime<Utc>,
    /// Embedded chunks
    entries: Vec<Chunk>,
}

/// Locally-persisted vector index over document chunks
pub struct VectorIndex {
    path: PathBuf,
    snapshot: RwLock<Option<IndexSnapshot>>,
    /// Modified time of the snapshot file as last loaded, for refresh()
    loaded_mtime: RwLock<Option<SystemTime>>,
}

impl VectorIndex {
    /// Open an index at `path`, loading the persisted snapshot when one
    /// exists. A corrupt snapshot is logged and ignored; the index stays
    /// unbuilt until a successful rebuild.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (snapshot, mtime) = match Self::load_snapshot(&path) {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!("Could not load index snapshot from {:?}: {}", path, e);
                (None, None)
            }
        };

        if let Some(ref snap) = snapshot {
            tracing::info!(
                "Loaded index snapshot: {} chunks, {} dimensions",
                snap.entries.len(),
                snap.dimensions
            );
        }

        Self {
            path,
            snapshot: RwLock::new(snapshot),
            loaded_mtime: RwLock::new(mtime),
        }
    }

    fn load_snapshot(path: &Path) -> Result<(Option<IndexSnapshot>, Option<SystemTime>)> {
        if !path.exists() {
            return Ok((None, None));
        }
        let content = std::fs::read_to_string(path)?;
        let snapshot: IndexSnapshot = serde_json::from_str(&content)?;
        let mtime = std::fs::metadata(path)?.modified().ok();
        Ok((Some(snapshot), mtime))
    }

    /// Path of the persisted snapshot
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.snapshot.read().as_ref().map_or(0, |s| s.entries.len())
    }

    /// Whether the index holds any chunks
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a snapshot has been built or loaded
    pub fn is_built(&self) -> bool {
        self.snapshot.read().is_some()
    }

    /// Content hash of the corpus the current snapshot was built from
    pub fn content_hash(&self) -> Option<String> {
        self.snapshot.read().as_ref().map(|s| s.content_hash.clone())
    }

    /// Rebuild the index from a chunk sequence, fully replacing any prior
    /// snapshot. All-or-nothing: every chunk is embedded before anything is
    /// written, and any failure leaves the previous snapshot untouched.
    pub async fn rebuild(
        &self,
        mut chunks: Vec<Chunk>,
        embedder: &Arc<dyn EmbeddingProvider>,
    ) -> Result<()> {
        if chunks.is_empty() {
            return Err(Error::index("cannot rebuild the index from zero chunks"));
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = embedder.embed_batch(&texts).await?;

        let dimensions = vectors
            .first()
            .map(Vec::len)
            .filter(|&d| d > 0)
            .ok_or_else(|| Error::embedding("embedder returned an empty vector"))?;

        for (chunk, vector) in chunks.iter_mut().zip(vectors) {
            if vector.len() != dimensions {
                return Err(Error::embedding(format!(
                    "inconsistent embedding dimensions: expected {}, got {}",
                    dimensions,
                    vector.len()
                )));
            }
            chunk.embedding = vector;
        }

        let mut hasher = Sha256::new();
        for text in &texts {
            hasher.update(text.as_bytes());
        }

        let snapshot = IndexSnapshot {
            dimensions,
            content_hash: format!("{:x}", hasher.finalize()),
            built_at: Utc::now(),
            entries: chunks,
        };

        self.publish(snapshot)
    }

    /// Atomically publish a snapshot: write to a tempfile in the target
    /// directory, fsync, rename over the live path, then swap in memory.
    fn publish(&self, snapshot: IndexSnapshot) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer(tmp.as_file_mut(), &snapshot)?;
        tmp.as_file_mut().flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| Error::index(format!("failed to publish snapshot: {}", e)))?;

        let mtime = std::fs::metadata(&self.path)
            .ok()
            .and_then(|m| m.modified().ok());

        tracing::info!(
            "Published index snapshot: {} chunks to {:?}",
            snapshot.entries.len(),
            self.path
        );

        *self.snapshot.write() = Some(snapshot);
        *self.loaded_mtime.write() = mtime;
        Ok(())
    }

    /// Reload the snapshot when the on-disk artifact changed since it was
    /// last read (another process may have republished it).
    pub fn refresh(&self) -> Result<()> {
        let current_mtime = std::fs::metadata(&self.path)
            .ok()
            .and_then(|m| m.modified().ok());

        if current_mtime.is_none() || current_mtime == *self.loaded_mtime.read() {
            return Ok(());
        }

        let (snapshot, mtime) = Self::load_snapshot(&self.path)?;
        if let Some(snap) = snapshot {
            tracing::info!("Reloaded index snapshot ({} chunks)", snap.entries.len());
            *self.snapshot.write() = Some(snap);
            *self.loaded_mtime.write() = mtime;
        }
        Ok(())
    }

    /// Embed a question and return the `k` most similar chunks.
    pub async fn query(
        &self,
        question: &str,
        k: usize,
        embedder: &Arc<dyn EmbeddingProvider>,
    ) -> Result<Vec<ScoredChunk>> {
        let query_vector = embedder.embed(question).await?;
        self.search(&query_vector, k)
    }

    /// Return the `k` entries nearest to `query_vector` under cosine
    /// similarity, sorted descending.
    pub fn search(&self, query_vector: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let guard = self.snapshot.read();
        let snapshot = guard
            .as_ref()
            .ok_or_else(|| Error::index("no index has been built yet"))?;

        if query_vector.len() != snapshot.dimensions {
            return Err(Error::index(format!(
                "query dimensions {} do not match index dimensions {}",
                query_vector.len(),
                snapshot.dimensions
            )));
        }

        let mut results: Vec<ScoredChunk> = snapshot
            .entries
            .iter()
            .map(|chunk| ScoredChunk {
                similarity: cosine_similarity(query_vector, &chunk.embedding),
                chunk: chunk.clone(),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(k);

        Ok(results)
    }
}

/// Cosine similarity between two vectors of equal length
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::EmbeddingProvider;
    use async_trait::async_trait;

    /// Deterministic test embedder: letter-frequency histogram over a-z.
    struct HistogramEmbedder;

    #[async_trait]
    impl EmbeddingProvider for HistogramEmbedder {
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
            "histogram"
        }
    }

    /// Embedder that always fails, for all-or-nothing rebuild tests.
    struct FailingEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FailingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(Error::embedding("embedding backend unavailable"))
        }

        fn dimensions(&self) -> usize {
            26
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn chunks_of(texts: &[&str]) -> Vec<Chunk> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Chunk::new(t.to_string(), 0, t.chars().count(), i as u32))
            .collect()
    }

    fn embedder() -> Arc<dyn EmbeddingProvider> {
        Arc::new(HistogramEmbedder)
    }

    #[tokio::test]
    async fn indexing_then_querying_own_text_ranks_it_first() {
        let dir = tempfile::tempdir().unwrap();
        let index = VectorIndex::open(dir.path().join("index.json"));
        let embedder = embedder();

        let chunks = chunks_of(&[
            "sound is a mechanical wave that propagates through a medium",
            "zebras and quokkas roam the grassy plains of faraway lands",
            "infrastructure expenditure quarterly budget review",
        ]);
        index.rebuild(chunks, &embedder).await.unwrap();

        let hits = index
            .query(
                "sound is a mechanical wave that propagates through a medium",
                2,
                &embedder,
            )
            .await
            .unwrap();

        assert_eq!(hits.len(), 2);
        assert!(hits[0].chunk.content.contains("mechanical wave"));
        assert!(hits[0].similarity > hits[1].similarity);
        assert!((hits[0].similarity - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn rebuild_from_empty_chunks_fails_without_corrupting_prior_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        let index = VectorIndex::open(&path);
        let embedder = embedder();

        index
            .rebuild(chunks_of(&["the original corpus"]), &embedder)
            .await
            .unwrap();
        let hash_before = index.content_hash().unwrap();

        let err = index.rebuild(Vec::new(), &embedder).await.unwrap_err();
        assert!(matches!(err, Error::Index(_)));

        // In-memory and on-disk state both survive.
        assert_eq!(index.content_hash().unwrap(), hash_before);
        let reopened = VectorIndex::open(&path);
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.content_hash().unwrap(), hash_before);
    }

    #[tokio::test]
    async fn embedding_failure_leaves_prior_snapshot_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        let index = VectorIndex::open(&path);
        let good = embedder();

        index
            .rebuild(chunks_of(&["first corpus"]), &good)
            .await
            .unwrap();

        let failing: Arc<dyn EmbeddingProvider> = Arc::new(FailingEmbedder);
        let err = index
            .rebuild(chunks_of(&["second corpus"]), &failing)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));

        let hits = index.query("first corpus", 1, &good).await.unwrap();
        assert!(hits[0].chunk.content.contains("first"));
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        let embedder = embedder();

        {
            let index = VectorIndex::open(&path);
            index
                .rebuild(chunks_of(&["persistent text about waves"]), &embedder)
                .await
                .unwrap();
        }

        let reopened = VectorIndex::open(&path);
        assert!(reopened.is_built());
        let hits = reopened
            .query("persistent text about waves", 1, &embedder)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn querying_an_unbuilt_index_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let index = VectorIndex::open(dir.path().join("index.json"));
        let err = index.search(&vec![0.0; 26], 4).unwrap_err();
        assert!(matches!(err, Error::Index(_)));
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_ignored_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, "{ not json").unwrap();

        let index = VectorIndex::open(&path);
        assert!(!index.is_built());
    }

    #[test]
    fn cosine_similarity_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }
}

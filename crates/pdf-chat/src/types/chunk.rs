//! Chunk record with source offsets and embedding

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chunk of the extracted document text.
///
/// `char_start`/`char_end` are character offsets into the concatenated
/// source text; consecutive chunks overlap, and the offsets are what allows
/// the original text to be reconstructed from the chunk sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Text content
    pub content: String,
    /// Embedding vector, filled in at index build time
    #[serde(default)]
    pub embedding: Vec<f32>,
    /// Character offset of the first character in the source text
    pub char_start: usize,
    /// Character offset one past the last character in the source text
    pub char_end: usize,
    /// Position within the chunk sequence (display ordering only)
    pub chunk_index: u32,
}

impl Chunk {
    /// Create a new chunk without an embedding
    pub fn new(content: String, char_start: usize, char_end: usize, chunk_index: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            embedding: Vec::new(),
            char_start,
            char_end,
            chunk_index,
        }
    }
}

//! Overlapping fixed-size text chunking
//!
//! Splits a long text into windows of at most `chunk_size` characters where
//! consecutive windows share `overlap` characters. Boundaries preferentially
//! fall on paragraph breaks, then line breaks, then word boundaries, before
//! falling back to hard character cuts. Each span records its character
//! offsets into the source, so concatenating spans with the overlaps removed
//! reconstructs the original text exactly.

use unicode_segmentation::UnicodeSegmentation;

/// A contiguous piece of the source text with its character offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSpan {
    /// The chunk text
    pub text: String,
    /// Character offset of the first character in the source
    pub char_start: usize,
    /// Character offset one past the last character in the source
    pub char_end: usize,
}

/// Text chunker with configurable size and overlap (both in characters)
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker. The overlap is clamped below the chunk size so
    /// splitting always makes forward progress.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            overlap: overlap.min(chunk_size - 1),
        }
    }

    /// Target chunk size in characters
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Overlap between consecutive chunks in characters
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split `text` into overlapping spans. Empty input yields no spans.
    pub fn split(&self, text: &str) -> Vec<ChunkSpan> {
        // Byte offset of every character, with a sentinel for the end, so
        // character-indexed windows can be sliced without re-walking.
        let mut byte_of: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        let total_chars = byte_of.len();
        byte_of.push(text.len());

        if total_chars == 0 {
            return Vec::new();
        }

        let mut spans = Vec::new();
        let mut start = 0usize;

        while start < total_chars {
            if total_chars - start <= self.chunk_size {
                spans.push(make_span(text, &byte_of, start, total_chars));
                break;
            }

            let hard_end = start + self.chunk_size;
            let end = self.break_point(text, &byte_of, start, hard_end);
            spans.push(make_span(text, &byte_of, start, end));

            start = end.saturating_sub(self.overlap).max(start + 1);
        }

        spans
    }

    /// Pick the end of the chunk starting at `start`. The search is limited
    /// to the trailing half of the window so a boundary never collapses the
    /// chunk to a sliver; the separator stays in the left chunk.
    fn break_point(&self, text: &str, byte_of: &[usize], start: usize, hard_end: usize) -> usize {
        let floor = start + self.chunk_size / 2;
        let window = &text[byte_of[floor]..byte_of[hard_end]];

        // Paragraph break
        if let Some(pos) = window.rfind("\n\n") {
            return char_at_byte(byte_of, byte_of[floor] + pos + 2);
        }

        // Line break
        if let Some(pos) = window.rfind('\n') {
            return char_at_byte(byte_of, byte_of[floor] + pos + 1);
        }

        // Word boundary: cut after the last whitespace run in the window
        let mut cut_after_ws: Option<usize> = None;
        for (offset, word) in window.split_word_bound_indices() {
            if word.chars().all(char::is_whitespace) {
                cut_after_ws = Some(offset + word.len());
            }
        }
        if let Some(rel) = cut_after_ws {
            let end = char_at_byte(byte_of, byte_of[floor] + rel);
            if end > start {
                return end;
            }
        }

        // Hard character cut
        hard_end
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(1000, 100)
    }
}

fn make_span(text: &str, byte_of: &[usize], start: usize, end: usize) -> ChunkSpan {
    ChunkSpan {
        text: text[byte_of[start]..byte_of[end]].to_string(),
        char_start: start,
        char_end: end,
    }
}

/// Character index of a byte offset that lies on a character boundary
fn char_at_byte(byte_of: &[usize], byte: usize) -> usize {
    byte_of.partition_point(|&b| b < byte)
}

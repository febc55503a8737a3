//! Document ingestion: PDF text extraction, chunking, and index build

pub mod chunker;
pub mod extractor;
pub mod pipeline;

pub use chunker::{ChunkSpan, TextChunker};
pub use extractor::{ExtractedCorpus, PdfExtractor, PdfFile, SkippedFile};
pub use pipeline::{DocumentPipeline, IngestSummary};

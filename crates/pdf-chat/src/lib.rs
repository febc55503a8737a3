//! pdf-chat: chat-with-your-PDFs answering service
//!
//! The pipeline extracts text from uploaded PDFs, splits it into
//! overlapping chunks, embeds and indexes them in a locally-persisted
//! vector index, and answers questions over a REST gateway via one of
//! three routed strategies: direct LLM answer, vector-store-grounded
//! answer, or encyclopedia lookup.

pub mod answer;
pub mod client;
pub mod config;
pub mod error;
pub mod generation;
pub mod index;
pub mod ingestion;
pub mod providers;
pub mod routing;
pub mod server;
pub mod session;
pub mod types;

pub use answer::{AnswerService, RoutedAnswer};
pub use client::GatewayClient;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use index::{ScoredChunk, VectorIndex};
pub use ingestion::{DocumentPipeline, IngestSummary, PdfFile, TextChunker};
pub use routing::{AnswerRouter, RoutePath};
pub use types::{AnswerRequest, AnswerResponse, Chunk, RoutedAnswerResponse};

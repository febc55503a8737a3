//! Core types for the answering service

pub mod chunk;
pub mod query;
pub mod response;

pub use chunk::Chunk;
pub use query::AnswerRequest;
pub use response::{AnswerResponse, Item, ItemResponse, RoutedAnswerResponse};

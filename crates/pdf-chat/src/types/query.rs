//! Request types for the gateway

use serde::{Deserialize, Serialize};

/// Body of both answer endpoints: a question plus the caller-supplied
/// context (typically the text extracted from the uploaded PDFs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    /// The question to answer
    pub query: String,
    /// Context text supplied by the caller; may be empty
    #[serde(default)]
    pub context: String,
}

impl AnswerRequest {
    /// Create a new request
    pub fn new(query: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: context.into(),
        }
    }
}

//! Response types for the gateway

use serde::{Deserialize, Serialize};

use crate::routing::RoutePath;

/// Response of `POST /AI_Answer/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// The generated answer text, returned unmodified from the model
    pub message: String,
}

/// Response of `POST /Smart_AI_Answer/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutedAnswerResponse {
    /// Which answering path handled the question
    pub path: RoutePath,
    /// The answer text produced by that path
    pub message: String,
}

/// Body of the demo `POST /items/` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
}

/// Response of the demo `POST /items/` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub message: String,
}

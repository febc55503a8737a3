//! Answer routing: three-way classification of incoming questions

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::providers::LlmProvider;

/// Which answering strategy handles a question. Serialized with the
/// gateway's wire labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutePath {
    /// Answer directly from the supplied context
    #[serde(rename = "AI_Response")]
    AiResponse,
    /// Answer grounded in vector-store retrieval
    #[serde(rename = "Vectorstore")]
    Vectorstore,
    /// Answer from an encyclopedia lookup
    #[serde(rename = "Wiki Search")]
    WikiSearch,
}

impl RoutePath {
    /// All valid wire labels, in declaration order
    pub const LABELS: [&'static str; 3] = ["AI_Response", "Vectorstore", "Wiki Search"];

    /// The wire label of this path
    pub fn label(&self) -> &'static str {
        match self {
            Self::AiResponse => "AI_Response",
            Self::Vectorstore => "Vectorstore",
            Self::WikiSearch => "Wiki Search",
        }
    }

    /// Parse a wire label. Returns `None` for anything outside the set.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "AI_Response" => Some(Self::AiResponse),
            "Vectorstore" => Some(Self::Vectorstore),
            "Wiki Search" => Some(Self::WikiSearch),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a question into one of the three answering paths with a
/// single LLM call. Stateless between calls.
pub struct AnswerRouter {
    llm: Arc<dyn LlmProvider>,
    domain_description: String,
}

impl AnswerRouter {
    /// Create a router. `domain_description` describes what the vector
    /// store contains (e.g. "documents about sound").
    pub fn new(llm: Arc<dyn LlmProvider>, domain_description: impl Into<String>) -> Self {
        Self {
            llm,
            domain_description: domain_description.into(),
        }
    }

    /// Classify a question. The classifier's reply is validated at this
    /// boundary: after trimming whitespace, surrounding quotes, and a
    /// trailing period, it must match one of the three labels exactly.
    /// Anything else is a routing error; no default route is guessed.
    pub async fn route(&self, question: &str) -> Result<RoutePath> {
        let prompt = PromptBuilder::build_router_prompt(&self.domain_description, question);
        let raw = self.llm.complete(&prompt).await?;

        let label = raw
            .trim()
            .trim_matches(|c| c == '"' || c == '\'' || c == '`')
            .trim_end_matches('.')
            .trim();

        let path = RoutePath::from_label(label).ok_or_else(|| {
            Error::Routing(format!(
                "classifier returned {:?}, expected one of {:?}",
                raw,
                RoutePath::LABELS
            ))
        })?;

        tracing::info!("Routed question to {}", path);
        Ok(path)
    }
}

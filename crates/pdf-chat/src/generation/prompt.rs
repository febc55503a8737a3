//! Prompt templates

use crate::index::ScoredChunk;

/// Prompt builder for answering and routing
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build a numbered context block from retrieved chunks
    pub fn build_context(results: &[ScoredChunk]) -> String {
        let mut context = String::new();

        for (i, result) in results.iter().enumerate() {
            context.push_str(&format!(
                "[{}]\n{}\n\n---\n\n",
                i + 1,
                result.chunk.content
            ));
        }

        context
    }

    /// Build a question-answering prompt over a context block. The model's
    /// response is returned to the caller unmodified.
    pub fn build_qa_prompt(question: &str, context: &str) -> String {
        format!(
            r#"Based on the following context, answer the question. Only use information from the context.

Context:
{context}

Question: {question}

Answer:"#,
            context = context,
            question = question
        )
    }

    /// Build the routing classification prompt. The classifier must reply
    /// with exactly one of the three route labels.
    pub fn build_router_prompt(domain_description: &str, question: &str) -> String {
        format!(
            r#"You are a routing classifier for a question answering system. A vector store holds {domain}.

Classify the user's question into exactly one of these labels:
- AI_Response: salutations, greetings, or small talk
- Vectorstore: questions answerable from {domain}
- Wiki Search: everything else

Reply with exactly one label and nothing else.

Question: {question}

Label:"#,
            domain = domain_description,
            question = question
        )
    }
}

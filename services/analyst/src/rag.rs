//! Retrieval-grounded question answering.

use std::sync::Arc;

use crate::embedder::Embedder;
use crate::error::ApiError;
use crate::generator::Generator;
use crate::index::VectorIndex;

/// Separator between retrieved passages in the grounding context.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Debug)]
pub struct GroundedAnswer {
    pub answer: String,
    /// Metadata of the retrieved chunks, nearest first.
    pub sources: Vec<serde_json::Value>,
}

pub struct RetrievalAnswerer {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    generator: Arc<dyn Generator>,
}

impl RetrievalAnswerer {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            embedder,
            index,
            generator,
        }
    }

    fn prompt(context: &str, question: &str) -> String {
        format!(
            "You are a FIFA World Cup expert analyst.\n\
             Answer the user's question using ONLY the context provided below.\n\
             If the context doesn't contain enough information, say so honestly.\n\
             Do not make up statistics or results.\n\
             \n\
             CONTEXT:\n\
             {context}\n\
             \n\
             QUESTION: {question}\n\
             \n\
             ANSWER:"
        )
    }

    /// Answer a question from the n_results nearest chunks.
    ///
    /// Input faults are rejected before the embedding call; any failing
    /// external call surfaces as one upstream fault, no partial results.
    pub async fn answer(&self, question: &str, n_results: i64) -> Result<GroundedAnswer, ApiError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ApiError::BadRequest("question cannot be empty".to_string()));
        }
        if n_results <= 0 {
            return Err(ApiError::BadRequest(
                "n_results must be a positive integer".to_string(),
            ));
        }

        let embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(|e| ApiError::Upstream(format!("embedding failed: {e}")))?;

        let chunks = self
            .index
            .query(&embedding, n_results as usize)
            .await
            .map_err(|e| ApiError::Upstream(format!("retrieval failed: {e}")))?;

        let context = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);

        let answer = self
            .generator
            .complete(&Self::prompt(&context, question))
            .await
            .map_err(|e| ApiError::Upstream(format!("generation failed: {e}")))?;

        Ok(GroundedAnswer {
            answer,
            sources: chunks.into_iter().map(|c| c.metadata).collect(),
        })
    }
}

//! Context retrieval for RAG answers.

use crate::error::{RaavanError, Result};
use crate::vector_store::{RetrievedChunk, VectorIndex};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Separator placed between retrieved chunks.
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Context assembled for one question. Never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedContext {
    /// Chunk texts joined in rank order.
    pub text: String,
    /// Number of chunks that went into `text`.
    pub chunk_count: usize,
}

impl RetrievedContext {
    pub fn from_chunks(chunks: &[RetrievedChunk]) -> Self {
        Self {
            text: join_chunks(chunks),
            chunk_count: chunks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_count == 0
    }
}

/// Join chunk texts in the order given, separated by a blank line.
pub fn join_chunks(chunks: &[RetrievedChunk]) -> String {
    chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(CHUNK_SEPARATOR)
}

/// Queries a [`VectorIndex`] and builds the context string.
pub struct ContextRetriever {
    index: Arc<dyn VectorIndex>,
    timeout: Duration,
}

impl ContextRetriever {
    /// Create a retriever with a 30 second timeout.
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self {
            index,
            timeout: Duration::from_secs(30),
        }
    }

    /// Bound each index query by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retrieve the top `k` chunks for `question`.
    ///
    /// Chunk order is whatever the index returned; it is not re-sorted or deduplicated.
    #[instrument(skip(self), fields(question = %question))]
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<RetrievedContext> {
        if k == 0 {
            return Err(RaavanError::InvalidInput(
                "retrieval k must be at least 1".to_string(),
            ));
        }

        let chunks = tokio::time::timeout(self.timeout, self.index.similarity_search(question, k))
            .await
            .map_err(|_| {
                RaavanError::Retrieval(format!(
                    "index query timed out after {}s",
                    self.timeout.as_secs_f64()
                ))
            })?
            .map_err(|e| RaavanError::Retrieval(e.to_string()))?;

        debug!("Retrieved {} chunks", chunks.len());
        Ok(RetrievedContext::from_chunks(&chunks))
    }
}

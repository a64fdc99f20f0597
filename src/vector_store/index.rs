//! The retrieval-facing view of the vector store.

use super::VectorStore;
use crate::embedding::Embedder;
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// What retrieval needs from an indexed chunk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedChunk {
    /// Chunk text.
    pub text: String,
    /// Similarity score assigned by the index (higher is better).
    pub score: f32,
}

impl RetrievedChunk {
    pub fn new(text: impl Into<String>, score: f32) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// A nearest-neighbour index over text.
///
/// Implementations return at most `k` chunks ranked best first.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>>;
}

/// Embeds the query, then searches a [`VectorStore`].
pub struct EmbeddingIndex {
    vector_store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
}

impl EmbeddingIndex {
    pub fn new(vector_store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            vector_store,
            embedder,
        }
    }
}

#[async_trait]
impl VectorIndex for EmbeddingIndex {
    #[instrument(skip(self, query))]
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>> {
        let query_embedding = self.embedder.embed(query).await?;
        let results = self.vector_store.search(&query_embedding, k).await?;
        debug!("Index returned {} chunks", results.len());

        Ok(results
            .into_iter()
            .map(|r| RetrievedChunk::new(r.document.content, r.score))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_store::{Document, MemoryVectorStore};

    /// Maps a handful of keywords onto fixed axes.
    struct KeywordEmbedder;

    #[async_trait]
    impl Embedder for KeywordEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let text = text.to_lowercase();
            Ok(vec![
                if text.contains("hanuman") { 1.0 } else { 0.0 },
                if text.contains("sita") { 1.0 } else { 0.0 },
                if text.contains("bridge") { 1.0 } else { 0.0 },
            ])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let mut out = Vec::with_capacity(texts.len());
            for text in texts {
                out.push(self.embed(text).await?);
            }
            Ok(out)
        }

        fn model(&self) -> &str {
            "keyword"
        }
    }

    #[tokio::test]
    async fn test_similarity_search_ranks_by_embedding() {
        let store = Arc::new(MemoryVectorStore::new());
        let embedder = Arc::new(KeywordEmbedder);

        let texts = [
            "Nala builds the bridge",
            "Hanuman finds Sita",
            "Hanuman burns Lanka",
        ];
        let embeddings = embedder
            .embed_batch(&texts.iter().map(|t| t.to_string()).collect::<Vec<_>>())
            .await
            .unwrap();
        let docs: Vec<Document> = texts
            .iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (text, embedding))| {
                Document::new("yuddha".into(), "Yuddha".into(), text.to_string(), embedding, i as i32)
            })
            .collect();
        store.upsert_batch(&docs).await.unwrap();

        let index = EmbeddingIndex::new(store, embedder);
        let chunks = index.similarity_search("Where did Hanuman meet Sita?", 2).await.unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "Hanuman finds Sita");
        assert_eq!(chunks[1].text, "Hanuman burns Lanka");
        assert!(chunks[0].score > chunks[1].score);
    }
}

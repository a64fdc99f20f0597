//! In-memory vector store implementation.
//!
//! Useful for testing and small datasets.

use super::{cosine_similarity, rank, Document, IndexedSource, SearchResult, VectorStore};
use crate::error::{RaavanError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory vector store. Documents keep their insertion order.
pub struct MemoryVectorStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryVectorStore {
    /// Create a new in-memory vector store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }

    fn poisoned<E: std::fmt::Display>(e: E) -> RaavanError {
        RaavanError::VectorStore(format!("Lock poisoned: {}", e))
    }
}

impl Default for MemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn upsert_batch(&self, docs: &[Document]) -> Result<usize> {
        let mut store = self.documents.write().map_err(Self::poisoned)?;
        for doc in docs {
            match store.iter_mut().find(|d| d.id == doc.id) {
                Some(existing) => *existing = doc.clone(),
                None => store.push(doc.clone()),
            }
        }
        Ok(docs.len())
    }

    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        let docs = self.documents.read().map_err(Self::poisoned)?;

        let results: Vec<SearchResult> = docs
            .iter()
            .map(|doc| SearchResult {
                score: cosine_similarity(query_embedding, &doc.embedding),
                document: doc.clone(),
            })
            .collect();

        Ok(rank(results, limit))
    }

    async fn delete_by_source(&self, source: &str) -> Result<usize> {
        let mut docs = self.documents.write().map_err(Self::poisoned)?;
        let initial_len = docs.len();
        docs.retain(|doc| doc.source != source);
        Ok(initial_len - docs.len())
    }

    async fn replace_source(&self, source: &str, docs: &[Document]) -> Result<usize> {
        let mut store = self.documents.write().map_err(Self::poisoned)?;
        store.retain(|doc| doc.source != source);
        store.extend(docs.iter().cloned());
        Ok(docs.len())
    }

    async fn list_sources(&self) -> Result<Vec<IndexedSource>> {
        let docs = self.documents.read().map_err(Self::poisoned)?;

        let mut source_map: HashMap<String, IndexedSource> = HashMap::new();

        for doc in docs.iter() {
            let entry = source_map.entry(doc.source.clone()).or_insert_with(|| IndexedSource {
                source: doc.source.clone(),
                title: doc.title.clone(),
                chunk_count: 0,
                indexed_at: doc.indexed_at,
            });

            entry.chunk_count += 1;
            if doc.indexed_at > entry.indexed_at {
                entry.indexed_at = doc.indexed_at;
            }
        }

        let mut sources: Vec<IndexedSource> = source_map.into_values().collect();
        sources.sort_by(|a, b| b.indexed_at.cmp(&a.indexed_at));

        Ok(sources)
    }

    async fn document_count(&self) -> Result<usize> {
        let docs = self.documents.read().map_err(Self::poisoned)?;
        Ok(docs.len())
    }
}

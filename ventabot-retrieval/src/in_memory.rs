use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use ventabot_core::{Document, SearchResult, StoreError, VectorStore};

#[derive(Default)]
struct StoreInner {
    // BTreeMap keeps iteration ordered by id, so equal-score results
    // come back in a stable order.
    docs: BTreeMap<String, Document>,
    dimension: Option<usize>,
}

/// Vector store backed by process memory. Documents are upserted by id;
/// the first add pins the embedding dimension for the store's lifetime.
#[derive(Clone, Default)]
pub struct InMemoryVectorStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(&self, docs: Vec<Document>) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for doc in docs {
            if doc.id.trim().is_empty() {
                return Err(StoreError::InvalidId(doc.id));
            }

            let dimension = match &doc.embedding {
                Some(embedding) => embedding.len(),
                None => return Err(StoreError::MissingEmbedding { id: doc.id }),
            };
            match inner.dimension {
                Some(expected) if expected != dimension => {
                    return Err(StoreError::DimensionMismatch {
                        expected,
                        got: dimension,
                    });
                }
                None => inner.dimension = Some(dimension),
                _ => {}
            }

            inner.docs.insert(doc.id.clone(), doc);
        }
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>, StoreError> {
        let inner = self.inner.read().await;
        let expected = inner.dimension.unwrap_or(query_embedding.len());
        if expected != query_embedding.len() {
            return Err(StoreError::DimensionMismatch {
                expected,
                got: query_embedding.len(),
            });
        }

        let mut scored = Vec::with_capacity(inner.docs.len());
        for doc in inner.docs.values() {
            let Some(embedding) = doc.embedding.as_deref() else {
                continue;
            };
            let mut score = cosine_similarity(query_embedding, embedding);
            if score.is_nan() {
                score = f32::NEG_INFINITY;
            }
            let mut document = doc.clone();
            document.embedding = None;
            scored.push(SearchResult { document, score });
        }

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn delete(&self, ids: &[String]) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for id in ids {
            inner.docs.remove(id);
        }
        Ok(())
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

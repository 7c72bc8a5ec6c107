use std::sync::Arc;

use ventabot_core::{Embedding, SearchResult, VectorStore};

use crate::RetrievalError;

/// Embeds a query and returns the `top_k` closest documents from the store.
pub struct Retriever {
    embedder: Arc<dyn Embedding>,
    store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedding>, store: Arc<dyn VectorStore>, top_k: usize) -> Self {
        Self {
            embedder,
            store,
            top_k,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>, RetrievalError> {
        let embedding = self.embedder.embed(query).await?;
        let results = self.store.search(&embedding, self.top_k).await?;
        Ok(results)
    }
}

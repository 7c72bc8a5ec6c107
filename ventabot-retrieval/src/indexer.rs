use std::sync::Arc;

use ventabot_core::{Document, Embedding, VectorStore};

use crate::RetrievalError;

/// Embeds documents and upserts them into a vector store.
pub struct Indexer {
    embedder: Arc<dyn Embedding>,
    store: Arc<dyn VectorStore>,
}

impl Indexer {
    pub fn new(embedder: Arc<dyn Embedding>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Embeds each document's content in one batch and stores the result.
    /// Any embedding a document already carries is replaced.
    pub async fn add_documents(&self, docs: Vec<Document>) -> Result<(), RetrievalError> {
        if docs.is_empty() {
            return Ok(());
        }
        for doc in &docs {
            if doc.id.trim().is_empty() {
                return Err(RetrievalError::InvalidId(doc.id.clone()));
            }
        }

        let texts: Vec<String> = docs.iter().map(|doc| doc.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        let docs_with_embeddings = docs
            .into_iter()
            .zip(embeddings)
            .map(|(mut doc, embedding)| {
                doc.embedding = Some(embedding);
                doc
            })
            .collect();

        self.store.add(docs_with_embeddings).await?;
        Ok(())
    }
}

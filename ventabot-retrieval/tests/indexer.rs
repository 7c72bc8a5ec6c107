use std::collections::HashMap;
use std::sync::Arc;

use ventabot_core::{Document, Embedding, VectorStore};
use ventabot_retrieval::{HashEmbedder, Indexer, InMemoryVectorStore, RetrievalError};

fn doc(id: &str, content: &str) -> Document {
    Document {
        id: id.to_string(),
        content: content.to_string(),
        metadata: HashMap::new(),
        embedding: None,
    }
}

#[tokio::test]
async fn indexer_embeds_and_stores_documents() {
    let embedder = Arc::new(HashEmbedder::new(16));
    let store = Arc::new(InMemoryVectorStore::new());
    let indexer = Indexer::new(embedder.clone(), store.clone());

    indexer
        .add_documents(vec![
            doc("shoes", "Shoes sold 120 units"),
            doc("hats", "Hats sold 30 units"),
        ])
        .await
        .unwrap();

    let query = embedder.embed("Shoes sold 120 units").await.unwrap();
    let results = store.search(&query, 2).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document.id, "shoes");
    assert!((results[0].score - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn indexer_rejects_blank_ids() {
    let embedder = Arc::new(HashEmbedder::new(16));
    let store = Arc::new(InMemoryVectorStore::new());
    let indexer = Indexer::new(embedder, store);

    let err = indexer
        .add_documents(vec![doc("", "no id")])
        .await
        .unwrap_err();
    assert!(matches!(err, RetrievalError::InvalidId(_)));
}

#[tokio::test]
async fn indexer_empty_batch_is_noop() {
    let embedder = Arc::new(HashEmbedder::new(16));
    let store = Arc::new(InMemoryVectorStore::new());
    let indexer = Indexer::new(embedder.clone(), store.clone());

    indexer.add_documents(Vec::new()).await.unwrap();

    let query = embedder.embed("anything").await.unwrap();
    let results = store.search(&query, 5).await.unwrap();
    assert!(results.is_empty());
}

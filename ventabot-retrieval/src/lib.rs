//! Document indexing and similarity search over an in-memory vector store.
//!
//! [`Indexer`] embeds documents and upserts them into a [`VectorStore`];
//! [`Retriever`] embeds a query and returns the closest documents by cosine
//! similarity. [`HashEmbedder`] is a deterministic embedder for tests and
//! offline runs.
//!
//! [`VectorStore`]: ventabot_core::VectorStore

mod error;
mod hash_embedder;
mod in_memory;
mod indexer;
mod retriever;

pub use error::RetrievalError;
pub use hash_embedder::HashEmbedder;
pub use in_memory::InMemoryVectorStore;
pub use indexer::Indexer;
pub use retriever::Retriever;

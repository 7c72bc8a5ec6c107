mod document;
mod embedding;
mod error;
mod llm;
mod value;
mod vector_store;

pub use document::Document;
pub use embedding::Embedding;
pub use error::{EmbeddingError, LlmError, StoreError};
pub use llm::{ChatLlm, LlmRequest, LlmResponse, Message, Role};
pub use value::Value;
pub use vector_store::{SearchResult, VectorStore};

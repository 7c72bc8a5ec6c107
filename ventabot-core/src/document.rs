use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Value;

/// A unit of indexable text. The embedding is populated by an indexer before
/// the document reaches a vector store and is stripped again on search hits.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub metadata: HashMap<String, Value>,
    pub embedding: Option<Vec<f32>>,
}

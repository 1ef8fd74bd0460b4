use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Embedding, MetadataFilter, SparseVector};

/// A record to be written to a vector store.
///
/// When `id` is `None`, the store assigns a generated id during `add` and
/// writes it back into the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorEntry {
    pub id: Option<String>,
    pub embedding: Embedding,
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl VectorEntry {
    pub fn new(embedding: Embedding, content: impl Into<String>) -> Self {
        Self {
            id: None,
            embedding,
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A similarity search request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorStoreQuery {
    pub embedding: Option<Embedding>,
    /// Overrides the store's configured top-K when positive.
    pub top_k: Option<usize>,
    /// Overrides the store's configured filter when set.
    pub filters: Option<MetadataFilter>,
}

impl VectorStoreQuery {
    pub fn new(embedding: Embedding) -> Self {
        Self {
            embedding: Some(embedding),
            ..Default::default()
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_filters(mut self, filters: MetadataFilter) -> Self {
        self.filters = Some(filters);
        self
    }
}

/// A search hit returned by `query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    pub id: String,
    pub embedding: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparse_embedding: Option<SparseVector>,
    pub content: String,
    pub metadata: HashMap<String, Value>,
    pub similarity_score: f32,
}

/// Ids selected for deletion; a single id normalizes to a one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorIds(Vec<String>);

impl VectorIds {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for VectorIds {
    fn from(id: &str) -> Self {
        Self(vec![id.to_string()])
    }
}

impl From<String> for VectorIds {
    fn from(id: String) -> Self {
        Self(vec![id])
    }
}

impl From<Vec<String>> for VectorIds {
    fn from(ids: Vec<String>) -> Self {
        Self(ids)
    }
}

impl From<&[&str]> for VectorIds {
    fn from(ids: &[&str]) -> Self {
        Self(ids.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for VectorIds {
    fn from(ids: [&str; N]) -> Self {
        Self(ids.iter().map(|s| s.to_string()).collect())
    }
}

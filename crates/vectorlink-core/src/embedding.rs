use std::fmt;

use serde::{Deserialize, Serialize};

/// Indices and their corresponding non-zero values of a sparse embedding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    pub indices: Vec<u32>,
    pub values: Vec<f32>,
}

impl SparseVector {
    pub fn new(indices: Vec<u32>, values: Vec<f32>) -> Self {
        Self { indices, values }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// An embedding in one of the three shapes a store can be configured for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Embedding {
    Dense { values: Vec<f32> },
    Sparse(SparseVector),
    Hybrid { dense: Vec<f32>, sparse: SparseVector },
}

impl Embedding {
    pub fn dense(values: Vec<f32>) -> Self {
        Self::Dense { values }
    }

    pub fn sparse(indices: Vec<u32>, values: Vec<f32>) -> Self {
        Self::Sparse(SparseVector::new(indices, values))
    }

    pub fn hybrid(dense: Vec<f32>, sparse: SparseVector) -> Self {
        Self::Hybrid { dense, sparse }
    }

    /// Short name of the embedding shape, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Dense { .. } => "dense",
            Self::Sparse(_) => "sparse",
            Self::Hybrid { .. } => "hybrid",
        }
    }
}

/// Which embedding shape a store accepts, fixed when the store is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Dense,
    Sparse,
    Hybrid,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::Sparse => "sparse",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

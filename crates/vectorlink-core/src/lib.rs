//! Core types and traits for VectorLink.
//!
//! Backend crates implement [`VectorStore`] over these types; callers build
//! [`VectorEntry`] records and [`VectorStoreQuery`] requests once and can
//! switch backends without touching their own code.

mod embedding;
mod entry;
mod error;
mod filter;
mod id;

pub use embedding::{Embedding, SearchMode, SparseVector};
pub use entry::{VectorEntry, VectorIds, VectorMatch, VectorStoreQuery};
pub use error::{TransportError, VectorStoreError};
pub use filter::{FilterCondition, FilterGroup, FilterLeaf, FilterOperator, MetadataFilter};
pub use id::{IdGenerator, SequentialIdGenerator, UuidGenerator};

use async_trait::async_trait;

/// Trait for remote vector storage backends.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Write entries to the store.
    ///
    /// Entries without an id get a generated one, written back into the
    /// slice. Returns the ids of all entries in input order.
    async fn add(&self, entries: &mut [VectorEntry]) -> Result<Vec<String>, VectorStoreError>;

    /// Search for the nearest entries to the query embedding.
    async fn query(&self, query: &VectorStoreQuery) -> Result<Vec<VectorMatch>, VectorStoreError>;

    /// Delete entries by id.
    async fn delete(&self, ids: VectorIds) -> Result<(), VectorStoreError>;
}

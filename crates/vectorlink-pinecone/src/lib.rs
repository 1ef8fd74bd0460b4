//! Pinecone vector store integration for VectorLink.
//!
//! This crate provides [`PineconeVectorStore`], an implementation of the
//! [`VectorStore`](vectorlink_core::VectorStore) trait backed by
//! [Pinecone](https://www.pinecone.io/) using its REST API. Dense, sparse
//! and hybrid indexes are supported; the [`SearchMode`] chosen at
//! construction decides which [`Embedding`] shape `add` and `query` accept.
//!
//! # Example
//!
//! ```rust,no_run
//! use vectorlink_pinecone::{Embedding, MetadataFilter, PineconeConfig, PineconeVectorStore};
//! use vectorlink_pinecone::{VectorEntry, VectorStore, VectorStoreQuery};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PineconeConfig::new("your-api-key", "https://my-index-abc123.svc.pinecone.io")
//!     .with_namespace("docs");
//! let store = PineconeVectorStore::new(config)?;
//!
//! let mut entries = vec![VectorEntry::new(Embedding::dense(vec![0.1, 0.2, 0.3]), "hello")];
//! store.add(&mut entries).await?;
//!
//! let query = VectorStoreQuery::new(Embedding::dense(vec![0.1, 0.2, 0.3]))
//!     .with_top_k(5)
//!     .with_filters(MetadataFilter::eq("lang", "en"));
//! let matches = store.query(&query).await?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
mod config;
pub mod filter;
mod transport;
mod vector_store;
pub mod wire;

pub use config::{PineconeConfig, StoreConfig, TransportConfig, DEFAULT_API_VERSION, DEFAULT_TOP_K};
pub use filter::translate_filter;
pub use transport::{FakeTransport, HttpTransport, PineconeTransport, RecordedRequest};
pub use vector_store::PineconeVectorStore;

// Re-export core types for convenience.
pub use vectorlink_core::{
    Embedding, MetadataFilter, SearchMode, SparseVector, VectorEntry, VectorIds, VectorMatch,
    VectorStore, VectorStoreError, VectorStoreQuery,
};

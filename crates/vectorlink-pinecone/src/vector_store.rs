use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use vectorlink_core::{
    IdGenerator, SearchMode, UuidGenerator, VectorEntry, VectorIds, VectorMatch, VectorStore,
    VectorStoreError, VectorStoreQuery,
};

use crate::codec::{decode_match, encode_entry, split_embedding};
use crate::config::{PineconeConfig, StoreConfig};
use crate::filter::translate_filter;
use crate::transport::{HttpTransport, PineconeTransport};
use crate::wire::{DeleteRequest, QueryRequest, UpsertRequest};

/// Pinecone-backed implementation of the [`VectorStore`] trait.
///
/// Configuration is fixed at construction; every operation is a single
/// request through the transport, so the store can be shared freely across
/// tasks.
pub struct PineconeVectorStore {
    transport: Arc<dyn PineconeTransport>,
    config: StoreConfig,
    ids: Arc<dyn IdGenerator>,
}

impl PineconeVectorStore {
    /// Create a store talking to Pinecone over HTTP.
    ///
    /// Fails with [`VectorStoreError::StoreInitialization`] when the HTTP
    /// client cannot be built from the host, API key and transport settings.
    pub fn new(config: PineconeConfig) -> Result<Self, VectorStoreError> {
        let transport = HttpTransport::new(&config.api_key, &config.host, &config.transport)
            .map_err(VectorStoreError::StoreInitialization)?;
        Ok(Self::with_transport(Arc::new(transport), config.store))
    }

    /// Create a store over any transport.
    pub fn with_transport(transport: Arc<dyn PineconeTransport>, config: StoreConfig) -> Self {
        Self {
            transport,
            config,
            ids: Arc::new(UuidGenerator),
        }
    }

    /// Replace the generator used for entries added without an id.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn search_mode(&self) -> SearchMode {
        self.config.search_mode
    }

    fn namespace(&self) -> Option<String> {
        self.config.namespace().map(str::to_string)
    }
}

#[async_trait]
impl VectorStore for PineconeVectorStore {
    async fn add(&self, entries: &mut [VectorEntry]) -> Result<Vec<String>, VectorStoreError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectors = Vec::with_capacity(entries.len());
        for entry in entries.iter_mut() {
            vectors.push(encode_entry(
                entry,
                self.config.search_mode,
                self.ids.as_ref(),
                &self.config.timestamp_fields,
            )?);
        }
        let ids: Vec<String> = vectors.iter().map(|v| v.id.clone()).collect();

        let namespace = self.namespace();
        tracing::debug!(namespace = ?namespace, count = ids.len(), "upserting vectors");

        let request = UpsertRequest { vectors, namespace };
        if let Err(e) = self.transport.upsert(request).await {
            tracing::error!(
                namespace = ?self.config.namespace(),
                count = ids.len(),
                error = %e,
                "failed to add vectors to Pinecone"
            );
            return Err(VectorStoreError::AddFailed(e));
        }

        Ok(ids)
    }

    async fn query(&self, query: &VectorStoreQuery) -> Result<Vec<VectorMatch>, VectorStoreError> {
        let embedding = query
            .embedding
            .as_ref()
            .ok_or(VectorStoreError::MissingEmbedding)?;
        let (vector, sparse_vector) = split_embedding(embedding, self.config.search_mode)?;

        let top_k = query
            .top_k
            .filter(|k| *k > 0)
            .unwrap_or_else(|| self.config.top_k());

        let filters = query.filters.as_ref().unwrap_or(&self.config.filters);
        let filter = translate_filter(filters)?;
        let filter = (!filter.is_empty()).then_some(Value::Object(filter));

        let namespace = self.namespace();
        tracing::debug!(
            namespace = ?namespace,
            top_k,
            mode = %self.config.search_mode,
            filtered = filter.is_some(),
            "querying vectors"
        );

        let request = QueryRequest {
            vector,
            sparse_vector,
            top_k,
            namespace,
            filter,
            include_metadata: true,
            include_values: true,
        };
        let response = self
            .transport
            .query(request)
            .await
            .map_err(VectorStoreError::QueryFailed)?;

        Ok(response
            .matches
            .unwrap_or_default()
            .into_iter()
            .map(|hit| decode_match(hit, &self.config.timestamp_fields))
            .collect())
    }

    async fn delete(&self, ids: VectorIds) -> Result<(), VectorStoreError> {
        if ids.is_empty() {
            return Ok(());
        }

        let ids = ids.into_vec();
        let count = ids.len();
        let namespace = self.namespace();
        tracing::debug!(namespace = ?namespace, count, "deleting vectors");

        let request = DeleteRequest { ids, namespace };
        self.transport.delete(request).await.map_err(|e| {
            tracing::error!(
                namespace = ?self.config.namespace(),
                count,
                error = %e,
                "failed to delete vectors from Pinecone"
            );
            VectorStoreError::DeleteFailed(e)
        })
    }
}

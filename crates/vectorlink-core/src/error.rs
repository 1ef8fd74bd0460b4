use thiserror::Error;

/// Failure reported by a transport client talking to a remote vector service.
///
/// The store wraps these verbatim into [`VectorStoreError`] without
/// inspecting them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("failed to build client: {0}")]
    Build(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("store initialization error: {0}")]
    StoreInitialization(#[source] TransportError),
    #[error("embedding mode mismatch: {0}")]
    EmbeddingModeMismatch(String),
    #[error("incomplete hybrid embedding: {0}")]
    IncompleteHybridEmbedding(String),
    #[error("query embedding is required")]
    MissingEmbedding,
    #[error("unsupported filter operator: {0}")]
    UnsupportedOperator(String),
    #[error("unsupported filter condition: {0}")]
    UnsupportedCondition(String),
    #[error("failed to add vectors: {0}")]
    AddFailed(#[source] TransportError),
    #[error("failed to query vectors: {0}")]
    QueryFailed(#[source] TransportError),
    #[error("failed to delete vectors: {0}")]
    DeleteFailed(#[source] TransportError),
    #[error("config error: {0}")]
    Config(String),
}

impl VectorStoreError {
    /// The transport error wrapped by this error, if any.
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            Self::StoreInitialization(e)
            | Self::AddFailed(e)
            | Self::QueryFailed(e)
            | Self::DeleteFailed(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` for errors raised by local validation, before any
    /// request reaches the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmbeddingModeMismatch(_)
                | Self::IncompleteHybridEmbedding(_)
                | Self::MissingEmbedding
                | Self::UnsupportedOperator(_)
                | Self::UnsupportedCondition(_)
        )
    }
}

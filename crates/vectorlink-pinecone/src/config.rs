use std::fmt;
use std::time::Duration;

use vectorlink_config::PineconeSettings;
use vectorlink_core::{MetadataFilter, SearchMode, VectorStoreError};

use crate::filter::translate_filter;

/// Top-K used when neither the query nor the store configures one.
pub const DEFAULT_TOP_K: usize = 10_000;

pub const DEFAULT_API_VERSION: &str = "2025-01";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Store behaviour, fixed for the lifetime of a [`PineconeVectorStore`](crate::PineconeVectorStore).
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub namespace: Option<String>,
    /// Applied to queries that carry no filter of their own.
    pub filters: MetadataFilter,
    pub search_mode: SearchMode,
    pub top_k: Option<usize>,
    /// Metadata keys holding `[epochSeconds, fractionalSeconds]` timestamps.
    pub timestamp_fields: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            filters: MetadataFilter::default(),
            search_mode: SearchMode::Dense,
            top_k: None,
            timestamp_fields: vec!["created_at".to_string(), "updated_at".to_string()],
        }
    }
}

impl StoreConfig {
    /// The namespace to send, treating an empty string as unset.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }

    pub fn top_k(&self) -> usize {
        self.top_k.filter(|k| *k > 0).unwrap_or(DEFAULT_TOP_K)
    }
}

/// HTTP client settings for [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Clone, PartialEq)]
pub struct TransportConfig {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    /// Value of the `X-Pinecone-API-Version` header.
    pub api_version: String,
    /// Extra headers sent with every request.
    pub headers: Vec<(String, String)>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            connect_timeout: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            headers: Vec::new(),
        }
    }
}

/// Configuration for [`PineconeVectorStore`](crate::PineconeVectorStore).
#[derive(Clone)]
pub struct PineconeConfig {
    pub api_key: String,
    /// Index host, e.g. `https://my-index-abc123.svc.pinecone.io`.
    pub host: String,
    pub store: StoreConfig,
    pub transport: TransportConfig,
}

impl PineconeConfig {
    pub fn new(api_key: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            host: host.into(),
            store: StoreConfig::default(),
            transport: TransportConfig::default(),
        }
    }

    /// Build a config from file settings, reading the API key from the
    /// environment variable the settings name.
    ///
    /// The configured filter is translated once here, so a filter Pinecone
    /// cannot express is rejected at load time.
    pub fn from_settings(settings: &PineconeSettings) -> Result<Self, VectorStoreError> {
        settings.validate()?;
        if let Some(filters) = &settings.filters {
            translate_filter(filters)?;
        }
        let api_key = settings.resolve_api_key()?;
        let mut config = Self::new(api_key, settings.host.clone())
            .with_search_mode(settings.search_mode);

        config.store.namespace = settings.namespace.clone();
        config.store.top_k = settings.top_k;
        if let Some(filters) = &settings.filters {
            config.store.filters = filters.clone();
        }
        if let Some(fields) = &settings.timestamp_fields {
            config.store.timestamp_fields = fields.clone();
        }
        if let Some(secs) = settings.timeout_secs {
            config.transport.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = settings.connect_timeout_secs {
            config.transport.connect_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(version) = &settings.api_version {
            config.transport.api_version = version.clone();
        }
        let mut headers: Vec<(String, String)> = settings
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        headers.sort();
        config.transport.headers = headers;

        Ok(config)
    }

    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.store.search_mode = mode;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.store.namespace = Some(namespace.into());
        self
    }

    pub fn with_filters(mut self, filters: MetadataFilter) -> Self {
        self.store.filters = filters;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.store.top_k = Some(top_k);
        self
    }

    pub fn with_timestamp_fields(mut self, fields: Vec<String>) -> Self {
        self.store.timestamp_fields = fields;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.transport.connect_timeout = Some(timeout);
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.transport.api_version = version.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.transport.headers.push((name.into(), value.into()));
        self
    }
}

impl fmt::Debug for PineconeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PineconeConfig")
            .field("api_key", &"[REDACTED]")
            .field("host", &self.host)
            .field("store", &self.store)
            .field("transport", &self.transport)
            .finish()
    }
}

//! Configuration loading for VectorLink stores.
//!
//! Settings live under a `[pinecone]` table in a TOML, JSON or YAML file:
//!
//! ```toml
//! [pinecone]
//! host = "https://my-index-abc123.svc.pinecone.io"
//! api_key_env = "PINECONE_API_KEY"
//! search_mode = "hybrid"
//! namespace = "docs"
//! top_k = 20
//! ```
//!
//! Every load validates the table; errors name the offending field
//! (`pinecone.top_k: must be greater than zero`).

mod loader;

pub use loader::{locate, ConfigFormat, CONFIG_ENV};

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use vectorlink_core::{MetadataFilter, SearchMode, VectorStoreError};

/// Top-level configuration file schema.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorLinkConfig {
    pub pinecone: PineconeSettings,
}

/// Connection and store settings for a Pinecone index.
#[derive(Debug, Clone, Deserialize)]
pub struct PineconeSettings {
    /// Index host, with or without scheme.
    pub host: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default)]
    pub search_mode: SearchMode,
    pub namespace: Option<String>,
    pub top_k: Option<usize>,
    pub timestamp_fields: Option<Vec<String>>,
    pub filters: Option<MetadataFilter>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub api_version: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_api_key_env() -> String {
    "PINECONE_API_KEY".to_string()
}

impl VectorLinkConfig {
    /// Locate, read and validate a configuration file.
    ///
    /// See [`locate`] for the search order.
    pub fn load(path: Option<&Path>) -> Result<Self, VectorStoreError> {
        let path = locate(path)?;
        let config: Self = loader::read(&path)?;
        config.pinecone.validate()?;
        Ok(config)
    }

    /// Parse and validate an in-memory document.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, VectorStoreError> {
        let config: Self = format.deserialize(content).map_err(VectorStoreError::Config)?;
        config.pinecone.validate()?;
        Ok(config)
    }
}

impl PineconeSettings {
    /// Check values the schema alone cannot rule out.
    pub fn validate(&self) -> Result<(), VectorStoreError> {
        if self.host.trim().is_empty() {
            return Err(field_error("host", "must not be empty"));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(field_error("api_key_env", "must not be empty"));
        }
        if self.top_k == Some(0) {
            return Err(field_error("top_k", "must be greater than zero"));
        }
        if self.timeout_secs == Some(0) {
            return Err(field_error("timeout_secs", "must be greater than zero"));
        }
        if self.connect_timeout_secs == Some(0) {
            return Err(field_error("connect_timeout_secs", "must be greater than zero"));
        }
        if let Some(version) = &self.api_version {
            if version.trim().is_empty() {
                return Err(field_error("api_version", "must not be empty"));
            }
        }
        if let Some(fields) = &self.timestamp_fields {
            if fields.iter().any(|f| f.is_empty()) {
                return Err(field_error("timestamp_fields", "contains an empty key"));
            }
        }
        if self.headers.keys().any(|name| name.trim().is_empty()) {
            return Err(field_error("headers", "contains an empty header name"));
        }
        Ok(())
    }

    /// Resolve the API key from the environment variable named by `api_key_env`.
    pub fn resolve_api_key(&self) -> Result<String, VectorStoreError> {
        std::env::var(&self.api_key_env).map_err(|_| {
            VectorStoreError::Config(format!(
                "environment variable '{}' not set",
                self.api_key_env
            ))
        })
    }
}

fn field_error(field: &str, problem: &str) -> VectorStoreError {
    VectorStoreError::Config(format!("pinecone.{field}: {problem}"))
}

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use vectorlink_core::TransportError;

use crate::config::TransportConfig;
use crate::wire::{DeleteRequest, QueryRequest, QueryResponse, UpsertRequest, UpsertResponse};

/// Request/response calls the store makes against a Pinecone index.
#[async_trait]
pub trait PineconeTransport: Send + Sync {
    async fn upsert(&self, request: UpsertRequest) -> Result<UpsertResponse, TransportError>;
    async fn query(&self, request: QueryRequest) -> Result<QueryResponse, TransportError>;
    async fn delete(&self, request: DeleteRequest) -> Result<(), TransportError>;
}

/// Production transport over the Pinecone data-plane REST API.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(
        api_key: &str,
        host: &str,
        config: &TransportConfig,
    ) -> Result<Self, TransportError> {
        if api_key.trim().is_empty() {
            return Err(TransportError::Build("API key is empty".to_string()));
        }

        let base_url = normalize_host(host)?;

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| TransportError::Build(format!("invalid API key: {e}")))?;
        key.set_sensitive(true);
        headers.insert("api-key", key);
        headers.insert(
            "x-pinecone-api-version",
            HeaderValue::from_str(&config.api_version)
                .map_err(|e| TransportError::Build(format!("invalid API version: {e}")))?,
        );
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::Build(format!("invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::Build(format!("invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Build(format!("HTTP client error: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<String, TransportError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Request(format!("POST {path}: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Request(format!("reading response body: {e}")))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

/// Prefix a bare host with `https://` and strip trailing slashes.
fn normalize_host(host: &str) -> Result<String, TransportError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(TransportError::Build("index host is empty".to_string()));
    }
    let candidate = if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };
    let url = reqwest::Url::parse(&candidate)
        .map_err(|e| TransportError::Build(format!("invalid index host '{host}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::Build(format!(
            "unsupported URL scheme '{}'",
            url.scheme()
        )));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn decode_body<T: DeserializeOwned + Default>(text: &str) -> Result<T, TransportError> {
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(text).map_err(|e| TransportError::Decode(e.to_string()))
}

#[async_trait]
impl PineconeTransport for HttpTransport {
    async fn upsert(&self, request: UpsertRequest) -> Result<UpsertResponse, TransportError> {
        let text = self.post("/vectors/upsert", &request).await?;
        decode_body(&text)
    }

    async fn query(&self, request: QueryRequest) -> Result<QueryResponse, TransportError> {
        let text = self.post("/query", &request).await?;
        decode_body(&text)
    }

    async fn delete(&self, request: DeleteRequest) -> Result<(), TransportError> {
        self.post("/vectors/delete", &request).await?;
        Ok(())
    }
}

/// A request captured by [`FakeTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRequest {
    Upsert(UpsertRequest),
    Query(QueryRequest),
    Delete(DeleteRequest),
}

/// Test transport that records requests and replays queued results.
///
/// With nothing queued, upserts and deletes succeed and queries return no
/// matches.
#[derive(Default)]
pub struct FakeTransport {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    upserts: Arc<Mutex<VecDeque<Result<UpsertResponse, TransportError>>>>,
    queries: Arc<Mutex<VecDeque<Result<QueryResponse, TransportError>>>>,
    deletes: Arc<Mutex<VecDeque<Result<(), TransportError>>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_upsert(&self, result: Result<UpsertResponse, TransportError>) -> &Self {
        self.upserts
            .try_lock()
            .expect("not concurrent during setup")
            .push_back(result);
        self
    }

    pub fn push_query(&self, result: Result<QueryResponse, TransportError>) -> &Self {
        self.queries
            .try_lock()
            .expect("not concurrent during setup")
            .push_back(result);
        self
    }

    pub fn push_delete(&self, result: Result<(), TransportError>) -> &Self {
        self.deletes
            .try_lock()
            .expect("not concurrent during setup")
            .push_back(result);
        self
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    async fn record(&self, request: RecordedRequest) {
        self.requests.lock().await.push(request);
    }
}

#[async_trait]
impl PineconeTransport for FakeTransport {
    async fn upsert(&self, request: UpsertRequest) -> Result<UpsertResponse, TransportError> {
        let count = request.vectors.len() as u64;
        self.record(RecordedRequest::Upsert(request)).await;
        self.upserts.lock().await.pop_front().unwrap_or(Ok(UpsertResponse {
            upserted_count: Some(count),
        }))
    }

    async fn query(&self, request: QueryRequest) -> Result<QueryResponse, TransportError> {
        self.record(RecordedRequest::Query(request)).await;
        self.queries
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(QueryResponse::default()))
    }

    async fn delete(&self, request: DeleteRequest) -> Result<(), TransportError> {
        self.record(RecordedRequest::Delete(request)).await;
        self.deletes.lock().await.pop_front().unwrap_or(Ok(()))
    }
}

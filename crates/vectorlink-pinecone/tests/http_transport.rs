use mockito::Matcher;
use serde_json::json;
use vectorlink_core::{
    Embedding, MetadataFilter, TransportError, VectorEntry, VectorStore, VectorStoreError,
    VectorStoreQuery,
};
use vectorlink_pinecone::wire::DeleteRequest;
use vectorlink_pinecone::{
    HttpTransport, PineconeConfig, PineconeTransport, PineconeVectorStore, TransportConfig,
};

#[test]
fn bare_host_gets_https_scheme() {
    let transport =
        HttpTransport::new("key", "idx-abc.svc.pinecone.io/", &TransportConfig::default()).unwrap();
    assert_eq!(transport.base_url(), "https://idx-abc.svc.pinecone.io");
}

#[test]
fn invalid_hosts_fail_to_build() {
    let config = TransportConfig::default();
    assert!(matches!(
        HttpTransport::new("key", "", &config),
        Err(TransportError::Build(_))
    ));
    assert!(matches!(
        HttpTransport::new("key", "ftp://idx.svc.pinecone.io", &config),
        Err(TransportError::Build(_))
    ));
    assert!(matches!(
        HttpTransport::new("key", "http://[::1", &config),
        Err(TransportError::Build(_))
    ));
}

#[tokio::test]
async fn upsert_sends_headers_and_camel_case_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/vectors/upsert")
        .match_header("api-key", "test-key")
        .match_header("x-pinecone-api-version", "2025-01")
        .match_header("x-source-tag", "vectorlink")
        .match_body(Matcher::PartialJson(json!({
            "namespace": "docs",
            "vectors": [{
                "id": "doc-1",
                "values": [0.5, 0.25],
                "metadata": {"content": "hello", "lang": "en"}
            }]
        })))
        .with_status(200)
        .with_body(r#"{"upsertedCount": 1}"#)
        .create_async()
        .await;

    let config = PineconeConfig::new("test-key", server.url())
        .with_namespace("docs")
        .with_header("X-Source-Tag", "vectorlink");
    let store = PineconeVectorStore::new(config).unwrap();

    let mut entries = vec![VectorEntry::new(Embedding::dense(vec![0.5, 0.25]), "hello")
        .with_id("doc-1")
        .with_metadata("lang", "en")];
    let ids = store.add(&mut entries).await.unwrap();
    assert_eq!(ids, vec!["doc-1".to_string()]);

    mock.assert_async().await;
}

#[tokio::test]
async fn query_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .match_body(Matcher::PartialJson(json!({
            "vector": [1.0, 0.0],
            "topK": 3,
            "filter": {"genre": {"$in": ["drama", "comedy"]}},
            "includeMetadata": true,
            "includeValues": true
        })))
        .with_status(200)
        .with_body(
            json!({
                "matches": [
                    {"id": "m1", "score": 0.8, "values": [1.0, 0.0],
                     "metadata": {"content": "first", "genre": "drama"}},
                    {"id": "m2", "score": 0.5}
                ],
                "namespace": ""
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = PineconeVectorStore::new(PineconeConfig::new("key", server.url())).unwrap();
    let query = VectorStoreQuery::new(Embedding::dense(vec![1.0, 0.0]))
        .with_top_k(3)
        .with_filters(MetadataFilter::is_in(
            "genre",
            vec![json!("drama"), json!("comedy")],
        ));
    let results = store.query(&query).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].content, "first");
    assert_eq!(results[0].metadata["genre"], json!("drama"));
    assert_eq!(results[1].content, "No metadata provided");
    mock.assert_async().await;
}

#[tokio::test]
async fn query_without_matches_is_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/query")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let store = PineconeVectorStore::new(PineconeConfig::new("key", server.url())).unwrap();
    let results = store
        .query(&VectorStoreQuery::new(Embedding::dense(vec![1.0])))
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn error_status_is_forwarded_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/vectors/delete")
        .with_status(401)
        .with_body("Invalid API Key")
        .create_async()
        .await;

    let store = PineconeVectorStore::new(PineconeConfig::new("key", server.url())).unwrap();
    match store.delete("doc-1".into()).await {
        Err(VectorStoreError::DeleteFailed(TransportError::Status { status, body })) => {
            assert_eq!(status, 401);
            assert_eq!(body, "Invalid API Key");
        }
        other => panic!("expected DeleteFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_query_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/query")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let store = PineconeVectorStore::new(PineconeConfig::new("key", server.url())).unwrap();
    let err = store
        .query(&VectorStoreQuery::new(Embedding::dense(vec![1.0])))
        .await
        .unwrap_err();
    assert!(matches!(err, VectorStoreError::QueryFailed(TransportError::Decode(_))));
}

#[tokio::test]
async fn delete_with_empty_response_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/vectors/delete")
        .match_body(Matcher::Json(json!({"ids": ["a", "b"]})))
        .with_status(200)
        .create_async()
        .await;

    let transport =
        HttpTransport::new("key", &server.url(), &TransportConfig::default()).unwrap();
    transport
        .delete(DeleteRequest {
            ids: vec!["a".into(), "b".into()],
            namespace: None,
        })
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
#[ignore = "requires PINECONE_API_KEY and PINECONE_HOST"]
async fn integration_add_query_delete() {
    let api_key = std::env::var("PINECONE_API_KEY").unwrap();
    let host = std::env::var("PINECONE_HOST").unwrap();
    let store = PineconeVectorStore::new(
        PineconeConfig::new(api_key, host).with_namespace("vectorlink-it"),
    )
    .unwrap();

    let mut entries = vec![VectorEntry::new(Embedding::dense(vec![0.1; 8]), "integration")];
    let ids = store.add(&mut entries).await.unwrap();

    let query = VectorStoreQuery::new(Embedding::dense(vec![0.1; 8])).with_top_k(1);
    let results = store.query(&query).await.unwrap();
    assert!(results.len() <= 1);

    store.delete(ids.into()).await.unwrap();
}

use std::error::Error;

use vectorlink_core::{TransportError, VectorStoreError};

#[test]
fn transport_error_is_exposed_as_source() {
    let cause = TransportError::Status {
        status: 503,
        body: "unavailable".into(),
    };
    let err = VectorStoreError::QueryFailed(cause.clone());
    assert_eq!(err.transport_error(), Some(&cause));
    let source = err.source().unwrap();
    assert_eq!(source.to_string(), cause.to_string());
    assert!(err.to_string().contains("503"));
}

#[test]
fn validation_errors_are_classified() {
    assert!(VectorStoreError::MissingEmbedding.is_validation());
    assert!(VectorStoreError::UnsupportedOperator("contains".into()).is_validation());
    assert!(!VectorStoreError::DeleteFailed(TransportError::Request("x".into())).is_validation());
    assert!(VectorStoreError::Config("x".into()).transport_error().is_none());
}

//! Conversion between VectorLink records and Pinecone's wire schema.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use vectorlink_core::{
    Embedding, IdGenerator, SearchMode, VectorEntry, VectorMatch, VectorStoreError,
};

use crate::wire::{PineconeMatch, PineconeVector, SparseValues};

/// Metadata key under which entry content is stored.
pub const CONTENT_KEY: &str = "content";

pub const NO_METADATA: &str = "No metadata provided";
pub const CONTENT_NOT_FOUND: &str = "Content field not found in metadata";

/// Check `embedding` against `mode` and split it into the dense and sparse
/// parts Pinecone expects for that mode.
pub fn split_embedding(
    embedding: &Embedding,
    mode: SearchMode,
) -> Result<(Option<Vec<f32>>, Option<SparseValues>), VectorStoreError> {
    match (mode, embedding) {
        (SearchMode::Dense, Embedding::Dense { values }) => Ok((Some(values.clone()), None)),
        (SearchMode::Sparse, Embedding::Sparse(sparse)) => {
            Ok((None, Some(SparseValues::from(sparse.clone()))))
        }
        (SearchMode::Hybrid, Embedding::Hybrid { dense, sparse }) => {
            match (dense.is_empty(), sparse.is_empty()) {
                (false, false) => Ok((Some(dense.clone()), Some(SparseValues::from(sparse.clone())))),
                (false, true) => Err(incomplete_hybrid("only dense vector provided")),
                (true, false) => Err(incomplete_hybrid("only sparse vector provided")),
                (true, true) => Err(incomplete_hybrid("neither was provided")),
            }
        }
        (SearchMode::Hybrid, Embedding::Dense { .. }) => {
            Err(incomplete_hybrid("only dense vector provided"))
        }
        (SearchMode::Hybrid, Embedding::Sparse(_)) => {
            Err(incomplete_hybrid("only sparse vector provided"))
        }
        (SearchMode::Dense | SearchMode::Sparse, other) => {
            Err(VectorStoreError::EmbeddingModeMismatch(format!(
                "{mode} search mode requires a {mode} vector, but a {} vector was provided.",
                other.kind()
            )))
        }
    }
}

fn incomplete_hybrid(detail: &str) -> VectorStoreError {
    VectorStoreError::IncompleteHybridEmbedding(format!(
        "Hybrid search requires both dense and sparse vectors, but {detail}."
    ))
}

/// Encode an entry for upsert.
///
/// A missing id is generated and written back into `entry` before encoding.
/// The entry's content overwrites any `content` metadata value.
pub fn encode_entry(
    entry: &mut VectorEntry,
    mode: SearchMode,
    ids: &dyn IdGenerator,
    timestamp_fields: &[String],
) -> Result<PineconeVector, VectorStoreError> {
    let id = match &entry.id {
        Some(id) if !id.is_empty() => id.clone(),
        _ => {
            let id = ids.generate();
            entry.id = Some(id.clone());
            id
        }
    };

    let (values, sparse_values) = split_embedding(&entry.embedding, mode)?;

    let mut metadata: Map<String, Value> = entry
        .metadata
        .iter()
        .map(|(key, value)| (key.clone(), encode_metadata_value(key, value, timestamp_fields)))
        .collect();
    metadata.insert(CONTENT_KEY.to_string(), Value::String(entry.content.clone()));

    Ok(PineconeVector {
        id,
        values,
        sparse_values,
        metadata,
    })
}

/// Decode a search hit. Never fails: metadata problems surface as sentinel
/// content strings.
pub fn decode_match(hit: PineconeMatch, timestamp_fields: &[String]) -> VectorMatch {
    let (content, metadata): (String, HashMap<String, Value>) = match hit.metadata {
        None => (NO_METADATA.to_string(), HashMap::new()),
        Some(mut metadata) => {
            let content = match metadata.remove(CONTENT_KEY) {
                None => CONTENT_NOT_FOUND.to_string(),
                Some(Value::String(s)) => s,
                Some(other) => format!("Content field is not a string: {other}"),
            };
            let metadata = metadata
                .into_iter()
                .map(|(key, value)| {
                    let value = decode_metadata_value(&key, value, timestamp_fields);
                    (key, value)
                })
                .collect();
            (content, metadata)
        }
    };

    VectorMatch {
        id: hit.id,
        embedding: hit.values.unwrap_or_default(),
        sparse_embedding: hit.sparse_values.map(Into::into),
        content,
        metadata,
        similarity_score: hit.score.unwrap_or(0.0),
    }
}

/// Coerce one metadata value into a form Pinecone stores.
///
/// Scalars and arrays pass through, except that a `[epochSeconds,
/// fractionalSeconds]` pair under a timestamp key becomes an RFC 3339 string.
/// Objects become their JSON text.
pub fn encode_metadata_value(key: &str, value: &Value, timestamp_fields: &[String]) -> Value {
    if is_timestamp_field(key, timestamp_fields) {
        if let Some(iso) = timestamp_pair(value).and_then(|(s, f)| timestamp_to_iso(s, f)) {
            return Value::String(iso);
        }
    }
    match value {
        Value::Object(_) => Value::String(value.to_string()),
        _ => value.clone(),
    }
}

/// Inverse of [`encode_metadata_value`] for values read back from Pinecone.
pub fn decode_metadata_value(key: &str, value: Value, timestamp_fields: &[String]) -> Value {
    if is_timestamp_field(key, timestamp_fields) {
        if let Some((secs, frac)) = value.as_str().and_then(iso_to_timestamp) {
            return Value::Array(vec![Value::from(secs), Value::from(frac)]);
        }
    }
    value
}

fn is_timestamp_field(key: &str, timestamp_fields: &[String]) -> bool {
    timestamp_fields.iter().any(|field| field == key)
}

fn timestamp_pair(value: &Value) -> Option<(i64, f64)> {
    match value.as_array()?.as_slice() {
        [secs, frac] => {
            let secs = secs.as_i64()?;
            let frac = frac.as_f64()?;
            (0.0..1.0).contains(&frac).then_some((secs, frac))
        }
        _ => None,
    }
}

/// Render epoch seconds plus a fraction in `[0, 1)` as RFC 3339 UTC.
///
/// The fraction is kept to the nanosecond. At least six digits are always
/// written; nine when the value is not a whole number of microseconds.
pub fn timestamp_to_iso(secs: i64, frac: f64) -> Option<String> {
    let mut nanos = (frac * 1_000_000_000.0).round() as i64;
    let mut secs = secs;
    if nanos >= 1_000_000_000 {
        secs += 1;
        nanos -= 1_000_000_000;
    }
    let datetime = DateTime::<Utc>::from_timestamp(secs, u32::try_from(nanos).ok()?)?;
    let precision = if nanos % 1_000 == 0 {
        SecondsFormat::Micros
    } else {
        SecondsFormat::Nanos
    };
    Some(datetime.to_rfc3339_opts(precision, true))
}

/// Parse an RFC 3339 string into epoch seconds and the fractional second.
pub fn iso_to_timestamp(s: &str) -> Option<(i64, f64)> {
    let datetime = DateTime::parse_from_rfc3339(s).ok()?.with_timezone(&Utc);
    Some((
        datetime.timestamp(),
        f64::from(datetime.timestamp_subsec_nanos()) / 1_000_000_000.0,
    ))
}

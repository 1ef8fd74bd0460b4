//! Translation of [`MetadataFilter`] trees into Pinecone's filter dialect.

use serde_json::{Map, Value};
use vectorlink_core::{
    FilterCondition, FilterGroup, FilterLeaf, FilterOperator, MetadataFilter, VectorStoreError,
};

const OPERATORS: &[(FilterOperator, &str)] = &[
    (FilterOperator::Equal, "$eq"),
    (FilterOperator::NotEqual, "$ne"),
    (FilterOperator::GreaterThan, "$gt"),
    (FilterOperator::LessThan, "$lt"),
    (FilterOperator::GreaterThanOrEqual, "$gte"),
    (FilterOperator::LessThanOrEqual, "$lte"),
    (FilterOperator::In, "$in"),
    (FilterOperator::NotIn, "$nin"),
];

const CONDITIONS: &[(FilterCondition, &str)] = &[
    (FilterCondition::And, "$and"),
    (FilterCondition::Or, "$or"),
];

/// Pinecone token for `operator`, or `None` if Pinecone has no equivalent.
pub fn operator_token(operator: FilterOperator) -> Option<&'static str> {
    OPERATORS
        .iter()
        .find(|(op, _)| *op == operator)
        .map(|(_, token)| *token)
}

/// Pinecone token for `condition`, or `None` if Pinecone has no equivalent.
pub fn condition_token(condition: FilterCondition) -> Option<&'static str> {
    CONDITIONS
        .iter()
        .find(|(c, _)| *c == condition)
        .map(|(_, token)| *token)
}

/// Translate a filter tree into a Pinecone filter object.
///
/// An empty tree yields an empty object, which matches every vector.
/// Groups whose children all translate to empty objects collapse to an
/// empty object, and a group left with a single child is replaced by that
/// child.
pub fn translate_filter(filter: &MetadataFilter) -> Result<Map<String, Value>, VectorStoreError> {
    match filter {
        MetadataFilter::Leaf(leaf) => translate_leaf(leaf),
        MetadataFilter::Group(group) => translate_group(group),
    }
}

fn translate_leaf(leaf: &FilterLeaf) -> Result<Map<String, Value>, VectorStoreError> {
    let mut out = Map::new();
    if leaf.operator == FilterOperator::Equal {
        out.insert(leaf.key.clone(), leaf.value.clone());
        return Ok(out);
    }

    let token = operator_token(leaf.operator)
        .ok_or_else(|| VectorStoreError::UnsupportedOperator(leaf.operator.to_string()))?;
    let mut comparison = Map::new();
    comparison.insert(token.to_string(), leaf.value.clone());
    out.insert(leaf.key.clone(), Value::Object(comparison));
    Ok(out)
}

fn translate_group(group: &FilterGroup) -> Result<Map<String, Value>, VectorStoreError> {
    if group.filters.is_empty() {
        return Ok(Map::new());
    }
    let token = condition_token(group.condition)
        .ok_or_else(|| VectorStoreError::UnsupportedCondition(group.condition.to_string()))?;

    let mut children = Vec::with_capacity(group.filters.len());
    for child in &group.filters {
        let translated = translate_filter(child)?;
        if !translated.is_empty() {
            children.push(translated);
        }
    }

    if children.len() <= 1 {
        return Ok(children.pop().unwrap_or_default());
    }

    let mut out = Map::new();
    out.insert(
        token.to_string(),
        Value::Array(children.into_iter().map(Value::Object).collect()),
    );
    Ok(out)
}

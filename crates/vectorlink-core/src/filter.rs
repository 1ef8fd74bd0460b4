use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison applied by a filter leaf.
///
/// This is the backend-independent operator set. Individual stores support
/// a subset and reject the rest at translation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    #[default]
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "nin")]
    NotIn,
    #[serde(rename = "text_match")]
    TextMatch,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "all")]
    All,
    #[serde(rename = "is_empty")]
    IsEmpty,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThanOrEqual => "<=",
            Self::In => "in",
            Self::NotIn => "nin",
            Self::TextMatch => "text_match",
            Self::Contains => "contains",
            Self::Any => "any",
            Self::All => "all",
            Self::IsEmpty => "is_empty",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean combinator of a filter group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterCondition {
    #[default]
    And,
    Or,
    Not,
}

impl FilterCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
        }
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `key <operator> value` comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterLeaf {
    pub key: String,
    #[serde(default)]
    pub operator: FilterOperator,
    pub value: Value,
}

/// Children combined under one condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterGroup {
    #[serde(default)]
    pub condition: FilterCondition,
    #[serde(default)]
    pub filters: Vec<MetadataFilter>,
}

/// Recursive boolean filter over metadata fields.
///
/// The default value is an empty `AND` group, which matches everything.
/// Both node shapes reject unknown fields, so a leaf with a bad operator
/// or a misspelled key fails to deserialize instead of reading as a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataFilter {
    Leaf(FilterLeaf),
    Group(FilterGroup),
}

impl Default for MetadataFilter {
    fn default() -> Self {
        Self::Group(FilterGroup::default())
    }
}

impl MetadataFilter {
    pub fn leaf(key: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self::Leaf(FilterLeaf {
            key: key.into(),
            operator,
            value: value.into(),
        })
    }

    pub fn group(condition: FilterCondition, filters: Vec<MetadataFilter>) -> Self {
        Self::Group(FilterGroup { condition, filters })
    }

    pub fn and(filters: Vec<MetadataFilter>) -> Self {
        Self::group(FilterCondition::And, filters)
    }

    pub fn or(filters: Vec<MetadataFilter>) -> Self {
        Self::group(FilterCondition::Or, filters)
    }

    pub fn eq(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::leaf(key, FilterOperator::Equal, value)
    }

    pub fn ne(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::leaf(key, FilterOperator::NotEqual, value)
    }

    pub fn gt(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::leaf(key, FilterOperator::GreaterThan, value)
    }

    pub fn gte(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::leaf(key, FilterOperator::GreaterThanOrEqual, value)
    }

    pub fn lt(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::leaf(key, FilterOperator::LessThan, value)
    }

    pub fn lte(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::leaf(key, FilterOperator::LessThanOrEqual, value)
    }

    pub fn is_in(key: impl Into<String>, values: Vec<Value>) -> Self {
        Self::leaf(key, FilterOperator::In, Value::Array(values))
    }

    pub fn not_in(key: impl Into<String>, values: Vec<Value>) -> Self {
        Self::leaf(key, FilterOperator::NotIn, Value::Array(values))
    }

    /// Returns `true` for a group without children.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Group(group) if group.filters.is_empty())
    }
}

use serde_json::{json, Value};
use vectorlink_core::{FilterCondition, FilterOperator, MetadataFilter, VectorStoreError};
use vectorlink_pinecone::translate_filter;

fn translate(filter: &MetadataFilter) -> Value {
    Value::Object(translate_filter(filter).unwrap())
}

#[test]
fn empty_tree_matches_everything() {
    assert_eq!(translate(&MetadataFilter::default()), json!({}));
    assert_eq!(translate(&MetadataFilter::or(vec![])), json!({}));
}

#[test]
fn equal_is_bare_key_value() {
    assert_eq!(
        translate(&MetadataFilter::eq("genre", "drama")),
        json!({"genre": "drama"})
    );
}

#[test]
fn operator_mapping() {
    let cases = [
        (FilterOperator::NotEqual, "$ne"),
        (FilterOperator::GreaterThan, "$gt"),
        (FilterOperator::LessThan, "$lt"),
        (FilterOperator::GreaterThanOrEqual, "$gte"),
        (FilterOperator::LessThanOrEqual, "$lte"),
        (FilterOperator::In, "$in"),
        (FilterOperator::NotIn, "$nin"),
    ];
    for (operator, token) in cases {
        let filter = MetadataFilter::leaf("year", operator, json!(2020));
        assert_eq!(
            translate(&filter),
            json!({"year": {token: 2020}}),
            "operator {operator}"
        );
    }
    assert_eq!(
        vectorlink_pinecone::filter::operator_token(FilterOperator::Equal),
        Some("$eq")
    );
}

#[test]
fn single_child_group_is_flattened() {
    let filter = MetadataFilter::and(vec![MetadataFilter::and(vec![MetadataFilter::gt(
        "rating", 4,
    )])]);
    assert_eq!(translate(&filter), json!({"rating": {"$gt": 4}}));
}

#[test]
fn groups_wrap_children_in_order() {
    let filter = MetadataFilter::or(vec![
        MetadataFilter::eq("genre", "drama"),
        MetadataFilter::and(vec![
            MetadataFilter::gte("year", 2020),
            MetadataFilter::is_in("lang", vec![json!("en"), json!("de")]),
        ]),
    ]);
    assert_eq!(
        translate(&filter),
        json!({
            "$or": [
                {"genre": "drama"},
                {"$and": [
                    {"year": {"$gte": 2020}},
                    {"lang": {"$in": ["en", "de"]}}
                ]}
            ]
        })
    );
}

#[test]
fn empty_children_are_discarded() {
    let filter = MetadataFilter::and(vec![
        MetadataFilter::or(vec![]),
        MetadataFilter::ne("status", "archived"),
        MetadataFilter::and(vec![]),
    ]);
    assert_eq!(translate(&filter), json!({"status": {"$ne": "archived"}}));
}

#[test]
fn unsupported_operator_fails() {
    let filter = MetadataFilter::and(vec![
        MetadataFilter::eq("genre", "drama"),
        MetadataFilter::leaf("title", FilterOperator::TextMatch, "star"),
    ]);
    match translate_filter(&filter) {
        Err(VectorStoreError::UnsupportedOperator(token)) => assert_eq!(token, "text_match"),
        other => panic!("expected UnsupportedOperator, got {other:?}"),
    }
}

#[test]
fn unsupported_condition_fails() {
    let filter = MetadataFilter::group(
        FilterCondition::Not,
        vec![MetadataFilter::eq("genre", "drama")],
    );
    match translate_filter(&filter) {
        Err(VectorStoreError::UnsupportedCondition(token)) => assert_eq!(token, "not"),
        other => panic!("expected UnsupportedCondition, got {other:?}"),
    }
}

#[test]
fn empty_not_group_matches_everything() {
    let filter = MetadataFilter::group(FilterCondition::Not, Vec::new());
    assert_eq!(translate(&filter), json!({}));
}

use couch_design::common::WireFormat;
use couch_design::errors::ErrorKind;
use couch_design::selector::{and, field, nor, not, or, PredicateExpression, Selector};
use couch_design_int_test::test_util::fixture_value;
use serde_json::json;

#[test]
fn test_builder_matches_fixture_selector() {
    let fixture = fixture_value("query-tests/index_json_complex.js").unwrap();
    let expected = Selector::from_value(fixture["def"]["partial_filter_selector"].clone()).unwrap();
    assert_eq!(field("year").gt(2010), expected);
    assert_eq!(expected.to_json().unwrap(), r#"{"year":{"$gt":2010}}"#);
}

#[test]
fn test_parse_forms_agree() {
    let expected = field("year").gt(2010);
    for text in [
        r#"{"year": {"$gt": 2010}}"#,
        r#"{"selector": {"year": {"$gt": 2010}}}"#,
        r#""selector": {"year": {"$gt": 2010}}"#,
        r#"selector: {"year": {"$gt": 2010}}"#,
    ] {
        assert_eq!(Selector::parse(text).unwrap(), expected, "{}", text);
    }
}

#[test]
fn test_parse_errors() {
    assert_eq!(Selector::parse("").unwrap_err().kind(), &ErrorKind::InvalidSelector);
    assert_eq!(Selector::parse("\"year\"").unwrap_err().kind(), &ErrorKind::InvalidSelector);
    assert_eq!(
        Selector::parse(r#""fields": {"year": 1}"#).unwrap_err().kind(),
        &ErrorKind::InvalidSelector
    );
}

#[test]
fn test_compound_selector() {
    let selector = and(vec![
        field("year").gte(2000),
        or(vec![field("genre").eq("Drama"), field("genre").eq("Comedy")]),
        not(field("director").exists(false)),
        nor(vec![field("rating").lt(2)]),
    ]);

    assert_eq!(
        selector.into_value(),
        json!({
            "$and": [
                {"year": {"$gte": 2000}},
                {"$or": [{"genre": {"$eq": "Drama"}}, {"genre": {"$eq": "Comedy"}}]},
                {"$not": {"director": {"$exists": false}}},
                {"$nor": [{"rating": {"$lt": 2}}]}
            ]
        })
    );
}

#[test]
fn test_array_operators() {
    let selector = field("genre").in_values(vec!["Drama", "Comedy"]).unwrap();
    assert_eq!(selector.into_value(), json!({"genre": {"$in": ["Drama", "Comedy"]}}));

    let single = Selector::parse(r#"{"year": {"$in": [2010]}}"#).unwrap();
    assert_eq!(single.to_json().unwrap(), r#"{"year":{"$in":[2010]}}"#);

    let err = field("genre").not_in(vec!["Drama"]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidSelector);

    let scores = field("scores")
        .elem_match(vec![PredicateExpression::gte(80), PredicateExpression::lt(85)])
        .unwrap();
    assert_eq!(
        scores.into_value(),
        json!({"scores": {"$elemMatch": {"$gte": 80, "$lt": 85}}})
    );
}

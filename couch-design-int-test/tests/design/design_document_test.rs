use couch_design::common::WireFormat;
use couch_design::design::{BuiltinReducer, DesignDocument};
use couch_design::errors::ErrorKind;
use couch_design_int_test::test_util::{fixture_value, read_fixture};
use serde_json::json;

const EXAMPLE: &str = "design-files/example_design_doc.js";
const VIEWS101: &str = "design-files/views101_design_doc.js";

fn example() -> DesignDocument {
    DesignDocument::from_json(&read_fixture(EXAMPLE).unwrap()).unwrap()
}

fn views101() -> DesignDocument {
    DesignDocument::from_json(&read_fixture(VIEWS101).unwrap()).unwrap()
}

#[test]
fn test_example_round_trip() {
    let ddoc = example();
    assert_eq!(ddoc.to_value().unwrap(), fixture_value(EXAMPLE).unwrap());

    let again = DesignDocument::from_json(&ddoc.to_json_pretty().unwrap()).unwrap();
    assert_eq!(again, ddoc);
}

#[test]
fn test_views101_round_trip() {
    let ddoc = views101();
    assert_eq!(ddoc.to_value().unwrap(), fixture_value(VIEWS101).unwrap());
}

#[test]
fn test_example_sections() {
    let ddoc = example();
    assert_eq!(ddoc.id(), "_design/example");
    assert_eq!(ddoc.language(), Some("javascript"));
    assert_eq!(ddoc.views().map(|v| v.len()), Some(14));
    assert_eq!(ddoc.filters().map(|f| f.len()), Some(1));
    assert_eq!(ddoc.shows().map(|s| s.len()), Some(2));
    assert_eq!(ddoc.lists().map(|l| l.len()), Some(1));
    assert_eq!(ddoc.updates().map(|u| u.len()), Some(2));
    assert_eq!(ddoc.fulltext().map(|f| f.len()), Some(2));
    assert!(ddoc.indexes().is_none());
    assert!(ddoc.rev().is_none());
    assert!(ddoc.extras().is_empty());
}

#[test]
fn test_example_view_order() {
    let ddoc = example();
    let names: Vec<&str> = ddoc.views().unwrap().keys().map(String::as_str).collect();
    assert_eq!(names.first(), Some(&"by_tag"));
    assert_eq!(names.last(), Some(&"created_total"));

    let shows: Vec<&str> = ddoc.shows().unwrap().keys().map(String::as_str).collect();
    assert_eq!(shows, vec!["example_show_2", "example_show_1"]);
}

#[test]
fn test_function_bodies_are_kept_verbatim() {
    let ddoc = example();
    let update = ddoc.update("example_update").unwrap();
    assert!(update.as_str().starts_with("function(doc, req) {\n\tvar field"));
    assert_eq!(
        ddoc.update("get-uuid").map(|u| u.as_str()),
        Some("function(doc, req) {\n\t return [null, req.uuid];\n}\n")
    );
    assert_eq!(
        ddoc.validate_doc_update().map(|v| v.as_str()),
        Some("function(newDoc, oldDoc, userCtx) {}\n")
    );
}

#[test]
fn test_example_rewrites_and_fulltext() {
    let ddoc = example();
    let rewrites = ddoc.rewrites().unwrap();
    assert_eq!(rewrites.len(), 1);
    assert_eq!(rewrites[0].from(), Some(""));
    assert_eq!(rewrites[0].to(), "index.html");
    assert_eq!(rewrites[0].method(), Some("GET"));
    assert_eq!(rewrites[0].query().map(|q| q.len()), Some(0));

    let by_title = ddoc.fulltext_index("by_title").unwrap();
    assert!(by_title.index().as_str().contains("doc.title"));
    assert!(by_title.defaults().is_none());
}

#[test]
fn test_rewrite_order_survives_round_trip() {
    let wire = json!({
        "_id": "_design/app",
        "rewrites": [
            {"from": "/zeta", "to": "_show/zeta"},
            {"from": "/alpha/*", "to": "_list/alpha/all", "method": "GET"},
            {"from": "/mid", "to": "_update/mid/:id", "method": "PUT", "query": {"id": ":id"}},
            {"from": "", "to": "index.html"}
        ]
    });
    let ddoc = DesignDocument::from_json(&wire.to_string()).unwrap();
    let targets: Vec<&str> = ddoc.rewrites().unwrap().iter().map(|r| r.to()).collect();
    assert_eq!(
        targets,
        vec!["_show/zeta", "_list/alpha/all", "_update/mid/:id", "index.html"]
    );
    assert_eq!(ddoc.to_value().unwrap(), wire);
}

#[test]
fn test_query_language_view_round_trip() {
    let wire = json!({
        "_id": "_design/testindexddoc",
        "_rev": "1-5f2f1c0d0e9a7b3c4d5e6f708192a3b4",
        "language": "query",
        "views": {
            "complexjson": {
                "map": {
                    "fields": {"Person_name": "asc", "Movie_year": "desc"},
                    "partial_filter_selector": {"year": {"$gt": 2010}}
                },
                "reduce": "_count",
                "options": {
                    "def": {
                        "fields": [{"Person_name": "asc"}, {"Movie_year": "desc"}],
                        "partial_filter_selector": {"year": {"$gt": 2010}}
                    }
                }
            }
        }
    });
    let ddoc = DesignDocument::from_json(&wire.to_string()).unwrap();
    let view = ddoc.view("complexjson").unwrap();
    assert!(view.map().query().is_some());
    assert_eq!(
        view.options().unwrap()["def"]["fields"][0],
        json!({"Person_name": "asc"})
    );
    assert_eq!(ddoc.to_value().unwrap(), wire);
}

#[test]
fn test_reducers() {
    let ddoc = views101();
    let diet_sum = ddoc.view("diet_sum").and_then(|v| v.reduce()).unwrap();
    assert_eq!(diet_sum.as_str(), "_sum\n");
    assert_eq!(diet_sum.builtin(), Some(BuiltinReducer::Sum));

    let jssum = ddoc.view("latin_name_jssum").and_then(|v| v.reduce()).unwrap();
    assert!(!jssum.is_builtin());
    assert!(ddoc.view("latin_name").and_then(|v| v.reduce()).is_none());

    let written = ddoc.to_json().unwrap();
    assert!(written.contains(r#""reduce":"_sum\n""#));
}

#[test]
fn test_search_index() {
    let ddoc = views101();
    let animals = ddoc.search_index("animals").unwrap();
    assert!(animals.index().as_str().starts_with("function(doc) { index(\"default\", doc._id);"));
    assert!(animals.analyzer().is_none());
}

#[test]
fn test_fixtures_validate() {
    assert!(example().validate().is_ok());
    assert!(views101().validate().is_ok());
}

#[test]
fn test_duplicate_names_are_rejected() {
    let text = read_fixture(VIEWS101).unwrap().replacen(
        "\"latin_name\": {",
        "\"latin_name_jssum\": {",
        1,
    );
    let err = DesignDocument::from_json(&text).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DuplicateName);
    assert!(err.message().contains("latin_name_jssum"));
}

#[test]
fn test_content_eq_with_revision() {
    let local = views101();
    let remote = views101().with_rev("2-7051cbe5c8faecd085a3fa619e6e6337");
    assert!(local.content_eq(&remote));

    let value = remote.to_value().unwrap();
    assert_eq!(value["_rev"], "2-7051cbe5c8faecd085a3fa619e6e6337");
    assert!(!example().content_eq(&remote));
}

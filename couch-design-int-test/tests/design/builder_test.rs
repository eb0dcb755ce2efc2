use couch_design::common::{FunctionBody, WireFormat};
use couch_design::design::{DesignDocument, FulltextIndex, MapReduce, RewriteRule, SearchIndex};
use couch_design::errors::ErrorKind;
use couch_design_int_test::test_util::{fixture_value, read_fixture};
use serde_json::Map;

#[test]
fn test_builder_reproduces_views101() {
    let fixture =
        DesignDocument::from_json(&read_fixture("design-files/views101_design_doc.js").unwrap())
            .unwrap();
    let view = |name: &str| fixture.view(name).unwrap().clone();
    let animals = fixture.search_index("animals").unwrap().index().as_str().to_string();

    let built = DesignDocument::builder("views101")
        .language("javascript")
        .map_reduce("latin_name_jssum", view("latin_name_jssum"))
        .map_reduce("latin_name", view("latin_name"))
        .map_reduce("diet_sum", view("diet_sum"))
        .search_index("animals", SearchIndex::new(animals))
        .build()
        .unwrap();

    assert!(built.content_eq(&fixture));
    assert_eq!(
        built.to_value().unwrap(),
        fixture_value("design-files/views101_design_doc.js").unwrap()
    );
}

#[test]
fn test_builder_reproduces_example_sections() {
    let built = DesignDocument::builder("example")
        .view("foo", "function(doc){ emit(doc.title, doc.position); }")
        .validate_doc_update("function(newDoc, oldDoc, userCtx) {}\n")
        .rewrite(
            RewriteRule::new("", "index.html")
                .with_method("GET")
                .with_query(Map::new()),
        )
        .fulltext(
            "by_title",
            FulltextIndex::new("function(doc) { var ret = new Document(); ret.add( doc.title ); return ret; }"),
        )
        .build()
        .unwrap();

    let value = built.to_value().unwrap();
    let fixture = fixture_value("design-files/example_design_doc.js").unwrap();
    assert_eq!(value["rewrites"], fixture["rewrites"]);
    assert_eq!(value["validate_doc_update"], fixture["validate_doc_update"]);
    assert_eq!(value["fulltext"]["by_title"], fixture["fulltext"]["by_title"]);
}

#[test]
fn test_builder_rejects_duplicate_names() {
    let err = DesignDocument::builder("example")
        .fulltext("by_title", FulltextIndex::new("function(doc) {}"))
        .fulltext("by_title", FulltextIndex::new("function(doc) { return null; }"))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DuplicateName);
}

#[test]
fn test_query_language_view() {
    let mut query = Map::new();
    query.insert("fields".to_string(), serde_json::json!({"year": "asc"}));

    let built = DesignDocument::builder("query")
        .language("query")
        .map_reduce("by_year", MapReduce::new(query).with_reduce("_count"))
        .build()
        .unwrap();

    let parsed = DesignDocument::from_json(&built.to_json().unwrap()).unwrap();
    let view = parsed.view("by_year").unwrap();
    assert!(view.map().query().is_some());
    assert_eq!(parsed, built);
}

#[test]
fn test_function_body_from_fixture_is_opaque() {
    let body = FunctionBody::from("function(doc) { not even javascript (");
    let built = DesignDocument::builder("opaque")
        .show("broken", body.as_str())
        .build()
        .unwrap();
    assert_eq!(built.show("broken"), Some(&body));
}

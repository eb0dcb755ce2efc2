use couch_design::common::{SortOrder, WireFormat};
use couch_design::index::{
    Analyzer, DefaultField, IndexDef, IndexDefinition, IndexType, Indexes, TextFieldType,
};
use couch_design::errors::ErrorKind;
use couch_design::selector::field;
use couch_design_int_test::test_util::{fixture_value, read_fixture};
use serde_json::{json, Value};

const JSON_COMPLEX: &str = "query-tests/index_json_complex.js";
const TEXT_COMPLEX: &str = "query-tests/index_text_complex.js";
const TEXT_SIMPLE_SELECTOR: &str = "query-tests/index_text_simple_selector.js";

fn load(fixture: &str) -> IndexDefinition {
    IndexDefinition::from_json(&read_fixture(fixture).unwrap()).unwrap()
}

#[test]
fn test_fixtures_round_trip() {
    for fixture in [JSON_COMPLEX, TEXT_COMPLEX, TEXT_SIMPLE_SELECTOR] {
        let index = load(fixture);
        assert_eq!(index.to_value().unwrap(), fixture_value(fixture).unwrap(), "{}", fixture);
    }
}

#[test]
fn test_type_discrimination() {
    assert_eq!(load(JSON_COMPLEX).index_type(), IndexType::Json);
    assert_eq!(load(TEXT_COMPLEX).index_type(), IndexType::Text);
    assert!(matches!(load(TEXT_SIMPLE_SELECTOR).definition(), IndexDef::Text(_)));
}

#[test]
fn test_complex_json_fields() {
    let index = load(JSON_COMPLEX);
    assert_eq!(index.design_document_id(), Some("_design/testindexddoc"));
    assert_eq!(index.name(), Some("complexjson"));

    let fields = index.json_fields().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name(), "Person_name");
    assert_eq!(fields[0].order(), Some(SortOrder::Ascending));
    assert_eq!(fields[1].name(), "Movie_year");
    assert_eq!(fields[1].order(), Some(SortOrder::Descending));
    assert_eq!(index.field_specs(), vec!["Person_name:asc", "Movie_year:desc"]);
    assert_eq!(index.filter_selector(), Some(&field("year").gt(2010)));
}

#[test]
fn test_complex_text_members() {
    let index = load(TEXT_COMPLEX);
    let IndexDef::Text(def) = index.definition() else {
        panic!("complextext should be a text index");
    };

    match def.default_analyzer() {
        Some(Analyzer::Config(config)) => {
            assert_eq!(config.name(), "perfield");
            assert_eq!(config.default_analyzer(), Some("english"));
            assert_eq!(config.field("german"), Some("german"));
        }
        other => panic!("unexpected analyzer {:?}", other),
    }
    assert_eq!(def.default_field(), Some(&DefaultField::enabled("spanish")));
    assert_eq!(def.index_array_lengths(), Some(true));
    assert!(def.selector().is_none());
    assert_eq!(
        index.fields(),
        vec![
            ("Movie_name", "string"),
            ("Movie_runtime", "number"),
            ("Movie_wonaward", "boolean")
        ]
    );
    assert_eq!(
        index.text_fields().unwrap()[2].field_type(),
        TextFieldType::Boolean
    );
}

#[test]
fn test_simple_selector_keeps_empty_default_field() {
    let index = load(TEXT_SIMPLE_SELECTOR);
    let IndexDef::Text(def) = index.definition() else {
        panic!("simpleselector should be a text index");
    };
    assert_eq!(def.default_analyzer(), Some(&Analyzer::named("keyword")));
    assert_eq!(def.default_field(), Some(&DefaultField::new()));
    assert!(def.partial_filter_selector().is_none());
    assert_eq!(index.filter_selector(), Some(&field("year").gt(2010)));

    let written = index.to_value().unwrap();
    assert_eq!(written["def"]["default_field"], json!({}));
    assert!(written["def"].get("selector").is_some());
    assert!(written["def"].get("partial_filter_selector").is_none());
}

#[test]
fn test_absent_default_field_stays_absent() {
    let mut value = fixture_value(TEXT_SIMPLE_SELECTOR).unwrap();
    if let Some(def) = value["def"].as_object_mut() {
        def.remove("default_field");
    }
    let index = IndexDefinition::from_value(value).unwrap();
    let written = index.to_value().unwrap();
    assert!(written["def"].get("default_field").is_none());
}

#[test]
fn test_create_payload_shape() {
    for fixture in [JSON_COMPLEX, TEXT_COMPLEX, TEXT_SIMPLE_SELECTOR] {
        let expected = fixture_value(fixture).unwrap();
        let payload = load(fixture).to_create_payload().unwrap();
        assert_eq!(payload["index"], expected["def"]);
        assert_eq!(payload["ddoc"], expected["ddoc"]);
        assert_eq!(payload["name"], expected["name"]);
        assert_eq!(payload["type"], expected["type"]);
        assert!(payload.get("def").is_none());

        let reparsed = IndexDefinition::from_value(payload).unwrap();
        assert_eq!(reparsed, load(fixture));
    }
}

#[test]
fn test_unknown_type_is_rejected() {
    let text = read_fixture(JSON_COMPLEX).unwrap().replace("\"json\"", "\"geo\"");
    let err = IndexDefinition::from_json(&text).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownIndexType);
}

#[test]
fn test_mismatched_field_shape_is_rejected() {
    let text = read_fixture(TEXT_COMPLEX).unwrap().replace("\"number\"", "\"desc\"");
    let err = IndexDefinition::from_json(&text).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidFieldShape);

    let text = read_fixture(JSON_COMPLEX).unwrap().replace("\"asc\"", "\"string\"");
    let err = IndexDefinition::from_json(&text).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidFieldShape);
}

#[test]
fn test_listing_of_fixtures() {
    let mut entries = vec![json!({
        "ddoc": null,
        "name": "_all_docs",
        "type": "special",
        "def": {"fields": [{"_id": "asc"}]}
    })];
    for fixture in [JSON_COMPLEX, TEXT_COMPLEX, TEXT_SIMPLE_SELECTOR] {
        entries.push(fixture_value(fixture).unwrap());
    }
    let wire = json!({"total_rows": 4, "indexes": entries});
    let listing = Indexes::from_json(&wire.to_string()).unwrap();

    assert_eq!(listing.all().len(), 4);
    let json_names: Vec<Option<&str>> = listing.json_indexes().iter().map(|i| i.name()).collect();
    assert_eq!(json_names, vec![Some("complexjson")]);
    let text_names: Vec<Option<&str>> = listing.text_indexes().iter().map(|i| i.name()).collect();
    assert_eq!(text_names, vec![Some("complextext"), Some("simpleselector")]);

    let written: Value = listing.to_value().unwrap();
    assert!(written["indexes"][0].as_object().unwrap().contains_key("ddoc"));
    assert_eq!(written, wire);
}

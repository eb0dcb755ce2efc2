use couch_design::common::WireFormat;
use couch_design::errors::ErrorKind;
use couch_design::index::{AnalyzerConfig, DefaultField, IndexDefinition};
use couch_design::selector::field;
use couch_design_int_test::test_util::fixture_value;

#[test]
fn test_json_builder_matches_fixture() {
    let index = IndexDefinition::json_builder()
        .design_document("_design/testindexddoc")
        .name("complexjson")
        .partial_filter_selector(field("year").gt(2010))
        .asc(&["Person_name"])
        .desc(&["Movie_year"])
        .build()
        .unwrap();

    assert_eq!(
        index.to_value().unwrap(),
        fixture_value("query-tests/index_json_complex.js").unwrap()
    );
}

#[test]
fn test_json_builder_from_specs_matches_fixture() {
    let index = IndexDefinition::json_builder()
        .design_document("_design/testindexddoc")
        .name("complexjson")
        .parse_partial_filter_selector(r#""partial_filter_selector": {"year": {"$gt": 2010}}"#)
        .field_spec("Person_name:asc")
        .field_spec("Movie_year:desc")
        .build()
        .unwrap();

    assert_eq!(
        index.to_value().unwrap(),
        fixture_value("query-tests/index_json_complex.js").unwrap()
    );
}

#[test]
fn test_text_builder_matches_complex_fixture() {
    let index = IndexDefinition::text_builder()
        .design_document("_design/testindexddoc")
        .name("complextext")
        .analyzer(
            AnalyzerConfig::per_field("english")
                .with_field("spanish", "spanish")
                .with_field("german", "german"),
        )
        .default_field(DefaultField::enabled("spanish"))
        .partial_filter_selector(field("year").gt(2010))
        .string(&["Movie_name"])
        .number(&["Movie_runtime"])
        .boolean(&["Movie_wonaward"])
        .index_array_lengths(true)
        .build()
        .unwrap();

    assert_eq!(
        index.to_value().unwrap(),
        fixture_value("query-tests/index_text_complex.js").unwrap()
    );
}

#[test]
fn test_text_builder_field_specs() {
    let index = IndexDefinition::text_builder()
        .field_spec("Movie_name:string")
        .field_spec("Movie_runtime:number")
        .build()
        .unwrap();
    assert_eq!(index.field_specs(), vec!["Movie_name:string", "Movie_runtime:number"]);
    assert_eq!(index.name(), None);
}

#[test]
fn test_builder_errors() {
    let err = IndexDefinition::json_builder()
        .parse_partial_filter_selector("year > 2010")
        .asc(&["year"])
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidSelector);

    let err = IndexDefinition::text_builder()
        .field_spec("Movie_name")
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidFieldShape);

    let err = IndexDefinition::json_builder()
        .name("")
        .asc(&["year"])
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ValidationError);
}

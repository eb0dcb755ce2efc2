use couch_design::common::WireFormat;
use couch_design::errors::ErrorKind;
use couch_design::loader::{load_directory, load_file, LoaderConfig};
use couch_design_int_test::test_util::{
    copy_fixture_dir, fixture_path, fixture_value, write_file, DESIGN_FILES, QUERY_TESTS,
};

#[test]
fn test_load_design_files_directory() {
    let docs = load_directory(fixture_path(DESIGN_FILES), &LoaderConfig::default()).unwrap();
    let ids: Vec<&str> = docs.iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec!["_design/example", "_design/views101"]);

    let expected = fixture_value("design-files/views101_design_doc.js").unwrap();
    assert_eq!(docs[1].to_value().unwrap(), expected);
}

#[test]
fn test_load_single_fixture() {
    let path = fixture_path("design-files/example_design_doc.js");
    let ddoc = load_file(&path, &LoaderConfig::default()).unwrap();
    assert_eq!(ddoc.views().map(|v| v.len()), Some(14));
}

#[test]
fn test_index_fixtures_are_not_design_documents() {
    let err = load_directory(fixture_path(QUERY_TESTS), &LoaderConfig::default()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MalformedJson);
    assert!(err.message().contains("index_json_complex.js"));
}

#[test]
fn test_nested_copy_with_extension_filter() {
    let dir = copy_fixture_dir(DESIGN_FILES).unwrap();
    write_file(
        dir.path(),
        "more/nested/app.json",
        r#"{"_id": "app", "shows": {"page": "function(doc, req) { return 'ok'; }"}}"#,
    )
    .unwrap();
    write_file(dir.path(), "README.md", "# not a design document").unwrap();

    let docs = load_directory(dir.path(), &LoaderConfig::default()).unwrap();
    let ids: Vec<&str> = docs.iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec!["_design/example", "_design/app", "_design/views101"]);

    let only_json = load_directory(dir.path(), &LoaderConfig::new().extensions(&["json"])).unwrap();
    assert_eq!(only_json.len(), 1);
    assert_eq!(only_json[0].id(), "_design/app");
}

#[test]
fn test_prefix_left_alone_when_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "bare.json", r#"{"_id": "bare"}"#).unwrap();

    let config = LoaderConfig::new().ensure_prefix(false).validate(false);
    assert_eq!(load_file(&path, &config).unwrap().id(), "bare");

    let err = load_file(&path, &LoaderConfig::new().ensure_prefix(false)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ValidationError);
    assert_eq!(err.root_kind(), &ErrorKind::ValidationError);
}

//! Taxonomy and program file loading.

use occmatch::error::ErrorCode;
use occmatch::search::build_index;
use occmatch::taxonomy::{load_programs, load_taxonomy, parse_programs, parse_taxonomy};
use occmatch::test_utils::fixtures::{UnitTestFixture, sample_entries};
use occmatch::OmError;

// ============================================================================
// Taxonomy files
// ============================================================================

#[test]
fn loads_bare_array_and_wrapped_object() {
    let fixture = UnitTestFixture::new();
    let bare = fixture.create_taxonomy();
    let wrapped = fixture.create_file(
        "wrapped.json",
        r#"{"occupations": [{"code": "29-1141", "title": "Registered Nurses"}]}"#,
    );

    assert_eq!(load_taxonomy(&bare).unwrap(), sample_entries());
    let entries = load_taxonomy(&wrapped).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].major_group, "");
}

#[test]
fn accepts_soc_code_aliases() {
    let entries = parse_taxonomy(
        r#"[{"soc_code": "15-1252", "title": "Software Developers"},
            {"socCode": "15-2051", "title": "Data Scientists", "majorGroup": "Computer"}]"#,
    )
    .unwrap();

    assert_eq!(entries[0].code, "15-1252");
    assert_eq!(entries[1].code, "15-2051");
    assert_eq!(entries[1].major_group, "Computer");
}

#[test]
fn missing_file_is_taxonomy_not_found() {
    let fixture = UnitTestFixture::new();
    let err = load_taxonomy(&fixture.data_path.join("absent.json")).unwrap_err();
    assert!(matches!(err, OmError::TaxonomyNotFound(_)));
    assert_eq!(err.code(), ErrorCode::TaxonomyNotFound);
}

#[test]
fn entry_without_code_is_fatal() {
    let err = parse_taxonomy(r#"[{"code": "1", "title": "A"}, {"title": "No Code"}]"#)
        .unwrap_err();
    match err {
        OmError::InvalidEntry { index, reason } => {
            assert_eq!(index, 1);
            assert!(reason.contains("code"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn blank_code_is_fatal() {
    let err = parse_taxonomy(r#"[{"code": "  ", "title": "Blank"}]"#).unwrap_err();
    assert!(matches!(err, OmError::InvalidEntry { index: 0, .. }));
}

#[test]
fn entry_without_title_is_fatal() {
    let err = parse_taxonomy(r#"[{"code": "29-1141"}]"#).unwrap_err();
    assert!(matches!(err, OmError::InvalidEntry { index: 0, .. }));
}

#[test]
fn malformed_json_is_parse_error() {
    let err = parse_taxonomy("[{").unwrap_err();
    assert_eq!(err.code(), ErrorCode::TaxonomyParseError);

    let err = parse_taxonomy(r#"{"entries": []}"#).unwrap_err();
    assert!(matches!(err, OmError::TaxonomyParse(_)));
}

#[test]
fn empty_taxonomy_file_is_rejected() {
    let fixture = UnitTestFixture::new();
    let path = fixture.create_file("empty.json", "[]");
    let err = load_taxonomy(&path).unwrap_err();
    assert!(matches!(err, OmError::EmptyTaxonomy));
}

#[test]
fn loaded_taxonomy_builds_index() {
    let fixture = UnitTestFixture::new();
    let index = build_index(load_taxonomy(&fixture.create_taxonomy()).unwrap()).unwrap();
    assert_eq!(index.len(), sample_entries().len());
    assert!(index.get("17-2141").is_some());
}

// ============================================================================
// Program files
// ============================================================================

#[test]
fn programs_parse_with_numeric_ids_and_type_field() {
    let programs = parse_programs(
        r#"{"programs": [
            {"id": 42, "name": "Nursing", "type": "Bachelor", "degreeDesignation": "BSN"},
            {"id": "cs-1", "longName": "Computer Science", "cipCode": "11.0701"}
        ]}"#,
    )
    .unwrap();

    assert_eq!(programs.len(), 2);
    assert_eq!(programs[0].id.as_deref(), Some("42"));
    assert_eq!(programs[0].program_type.as_deref(), Some("Bachelor"));
    assert_eq!(programs[0].degree_designation.as_deref(), Some("BSN"));
    assert_eq!(programs[1].cip.as_deref(), Some("11.0701"));
}

#[test]
fn missing_program_file_is_program_error() {
    let fixture = UnitTestFixture::new();
    let err = load_programs(&fixture.data_path.join("missing.json")).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ProgramParseError);
}

#[test]
fn program_file_round_trip() {
    let fixture = UnitTestFixture::new();
    let path = fixture.create_programs(r#"[{"name": "Accounting"}, {}]"#);
    let programs = load_programs(&path).unwrap();
    assert_eq!(programs.len(), 2);
    assert!(programs[1].is_blank());
}

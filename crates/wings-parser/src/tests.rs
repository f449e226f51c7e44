use std::fs;
use std::path::PathBuf;

use crate::errors::ParserError;
use crate::schema::SheetKind;
use crate::{parse_sheet, parse_table};

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

#[test]
fn parses_photo_sheet_as_opaque_text() {
    let content = fixture("photo_links.csv");
    let table = parse_sheet(SheetKind::Photos, &content).expect("photo sheet parse failed");

    assert_eq!(table.columns(), ["Name", "URL"]);
    assert_eq!(table.height(), 9);
    assert_eq!(table.value(0, "Name"), Some("CAM00123d.JPG"));
    assert_eq!(table.value(8, "URL"), None);
    assert_eq!(table.content_hash.len(), 64);
}

#[test]
fn keeps_na_literal_and_nulls_empty_cells() {
    let content = fixture("collection.csv");
    let table = parse_sheet(SheetKind::Collection, &content).expect("collection parse failed");

    assert_eq!(table.value(0, "CAM_ID_insectary"), Some("NA"));
    assert_eq!(table.value(2, "CAM_ID_insectary"), None);
    assert_eq!(table.value(3, "CAM_ID"), None);
    assert_eq!(table.value(1, "Collection_date"), Some("#VALUE!"));
}

#[test]
fn strips_bom_names_blank_headers_and_pads_short_rows() {
    let content = fixture("bom_blank_header.csv");
    let table = parse_table(SheetKind::Collection, &content).expect("parse failed");

    assert_eq!(table.columns(), ["CAM_ID", "Unnamed: 1", "Notes"]);
    assert_eq!(table.value(0, "CAM_ID"), Some("00123"));
    assert_eq!(table.value(0, "Notes"), Some("quoted, with comma"));
    assert_eq!(table.value(1, "CAM_ID"), Some("CAM1"));
    assert_eq!(table.value(1, "Notes"), None);
}

#[test]
fn numbers_repeated_headers() {
    let content = fixture("duplicate_header.csv");
    let table = parse_sheet(SheetKind::Collection, &content).expect("duplicate headers should parse");

    assert_eq!(
        table.columns(),
        ["CAM_ID", "Notes", "Notes.1", "Notes.1.1", "Notes.2"]
    );
    assert_eq!(table.value(0, "Notes"), Some("a"));
    assert_eq!(table.value(0, "Notes.1"), Some("b"));
    assert_eq!(table.value(0, "Notes.1.1"), Some("c"));
    assert_eq!(table.value(0, "Notes.2"), Some("d"));
}

#[test]
fn repeated_blank_headers_stay_distinct() {
    let table = parse_table(SheetKind::Crispr, "CAM_ID,,\nCAM1,x,y\n").expect("parse failed");
    assert_eq!(table.columns(), ["CAM_ID", "Unnamed: 1", "Unnamed: 2"]);
}

#[test]
fn rejects_missing_required_column() {
    let err = parse_sheet(SheetKind::Photos, "Name,Link\nCAM1d.JPG,x\n").unwrap_err();
    match err {
        ParserError::MissingColumn { sheet, column } => {
            assert_eq!(sheet, "Photo_links");
            assert_eq!(column, "URL");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_empty_document() {
    let err = parse_table(SheetKind::Crispr, "").unwrap_err();
    assert!(matches!(err, ParserError::EmptyHeader { sheet: "CRISPR" }));
}

#[test]
fn header_without_rows_is_an_empty_table() {
    let table = parse_sheet(SheetKind::Insectary, "CAM_ID,SPECIES\n").expect("parse failed");
    assert!(table.is_empty());
    assert_eq!(table.columns(), ["CAM_ID", "SPECIES"]);
}

#[test]
fn rejects_rows_wider_than_header() {
    let err = parse_table(SheetKind::Crispr, "CAM_ID,Mutant\nCAM1,WntA,extra\n").unwrap_err();
    match err {
        ParserError::DataRow { line_index, .. } => assert_eq!(line_index, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn tolerates_trailing_empty_cells() {
    let table = parse_table(SheetKind::Crispr, "CAM_ID,Mutant\nCAM1,WntA,,\n").expect("parse failed");
    assert_eq!(table.height(), 1);
    assert_eq!(table.value(0, "Mutant"), Some("WntA"));
}

#[test]
fn identical_content_hashes_identically() {
    let content = fixture("crispr.csv");
    let first = parse_sheet(SheetKind::Crispr, &content).expect("parse failed");
    let second = parse_sheet(SheetKind::Crispr, &content).expect("parse failed");
    assert_eq!(first.content_hash, second.content_hash);
    assert_eq!(first, second);
}

#[test]
fn table_column_operations() {
    let mut table = parse_table(
        SheetKind::Collection,
        "CAM_ID,SPECIES,Species\nCAM1,Melinaea mothone,old\n",
    )
    .expect("parse failed");

    assert!(table.rename_column("SPECIES", "Species"));
    assert_eq!(table.columns(), ["CAM_ID", "Species"]);
    assert_eq!(table.value(0, "Species"), Some("Melinaea mothone"));

    let idx = table.ensure_column("ID_status");
    assert_eq!(idx, 2);
    assert_eq!(table.value(0, "ID_status"), None);

    assert!(table.copy_column("CAM_ID", "CAM_ID_copy"));
    assert_eq!(table.value(0, "CAM_ID_copy"), Some("CAM1"));
    assert!(!table.copy_column("missing", "other"));
}

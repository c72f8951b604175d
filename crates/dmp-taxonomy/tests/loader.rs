//! Taxonomy loading from in-memory documents, CSV directories and workbooks.

use std::fs;
use std::path::{Path, PathBuf};

use dmp_model::AttributeKind;
use dmp_taxonomy::{Document, DocumentError, Resolution, Sheet, Taxonomy};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn header() -> Vec<Vec<&'static str>> {
    vec![
        vec!["", "Taxonomy"],
        vec![],
        vec!["#", "ID", "Name", "Short name", "Type", "Description"],
    ]
}

fn sheet(name: &str, data: Vec<Vec<&'static str>>) -> Sheet {
    let mut rows = header();
    rows.extend(data);
    Sheet::from_rows(name, rows)
}

fn sample_document() -> Document {
    Document::new(vec![
        sheet("Notes", vec![vec!["", "N1", "not", "a", "dictionary"]]),
        sheet(
            "Attributes",
            vec![
                vec!["1", "A1", "age", "age", "Integer", ""],
                vec!["2", "A2", "city", "city", "CityCodes", ""],
                vec!["3", "A1", "age_again", "", "String", ""],
                vec!["4", "A4", "group", "", "Groups", ""],
            ],
        ),
        sheet("CityCodes", vec![vec!["", "5", "", "Berlin"]]),
        sheet("EmptyCodes", vec![]),
    ])
}

#[test]
fn builds_index_and_dictionaries() {
    let taxonomy = Taxonomy::from_document(&sample_document()).expect("load taxonomy");

    assert_eq!(taxonomy.attributes().len(), 4);
    assert_eq!(taxonomy.index().len(), 3);
    assert_eq!(taxonomy.attribute("A2").map(|a| a.name.as_str()), Some("city"));

    let dictionaries = taxonomy.dictionaries();
    assert_eq!(dictionaries.len(), 2);
    assert_eq!(dictionaries.resolve("CityCodes", "5"), Resolution::Found("Berlin"));
    assert_eq!(dictionaries.resolve("EmptyCodes", "5"), Resolution::UnknownCode);
    assert_eq!(dictionaries.resolve("Notes", "N1"), Resolution::UnknownType);
}

#[test]
fn first_duplicate_id_governs() {
    let taxonomy = Taxonomy::from_document(&sample_document()).expect("load taxonomy");

    let age = taxonomy.attribute("A1").expect("A1 defined");
    assert_eq!(age.name, "age");
    assert_eq!(age.kind(), AttributeKind::Direct(dmp_model::ScalarType::Integer));
    assert_eq!(taxonomy.index().duplicate_ids(), ["A1".to_string()]);
}

#[test]
fn reserved_sheet_type_has_no_dictionary() {
    let document = Document::new(vec![
        sheet("Attributes", vec![vec!["", "A4", "group", "", "Groups", ""]]),
        sheet("Groups", vec![vec!["", "1", "", "Group one"]]),
    ]);
    let taxonomy = Taxonomy::from_document(&document).expect("load taxonomy");

    assert!(!taxonomy.dictionaries().contains_type("Groups"));
    assert_eq!(taxonomy.dictionaries().lookup("Groups", "1"), None);
}

#[test]
fn missing_attributes_sheet_is_an_error() {
    let document = Document::new(vec![sheet("CityCodes", vec![])]);
    let error = Taxonomy::from_document(&document).unwrap_err();
    assert!(matches!(error, DocumentError::MissingAttributesSheet { .. }));
}

#[test]
fn summary_counts() {
    let taxonomy = Taxonomy::from_document(&sample_document()).expect("load taxonomy");
    let summary = taxonomy.summary();

    assert_eq!(summary.attribute_rows, 4);
    assert_eq!(summary.attribute_count, 3);
    assert_eq!(summary.duplicate_ids, vec!["A1".to_string()]);
    assert_eq!(summary.dictionary_count, 2);
    assert_eq!(summary.empty_dictionaries, 1);
    assert_eq!(summary.dictionary_entries, 1);
    assert_eq!(summary.fingerprint, None);
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

#[test]
fn loads_csv_directory() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("Attributes.csv"),
        ",Taxonomy\n,\n#,ID,Name,Short,Type,Description\n1,A1,age,age,Integer,Age\n2,A2,city,city,CityCodes,City\n",
    );
    write(
        &dir.path().join("CityCodes.csv"),
        "h\nh\nh\n,5,,Berlin\n,6,,Paris\n",
    );
    write(&dir.path().join("types.csv"), "h\nh\nh\n,Integer,,Number\n");
    write(&dir.path().join("readme.txt"), "not a sheet");

    let taxonomy = Taxonomy::load(dir.path()).expect("load csv taxonomy");

    assert_eq!(taxonomy.attributes().len(), 2);
    assert_eq!(taxonomy.dictionaries().len(), 1);
    assert_eq!(taxonomy.dictionaries().lookup("CityCodes", "6"), Some("Paris"));
    assert!(!taxonomy.dictionaries().contains_type("types"));
    assert_eq!(taxonomy.fingerprint().map(str::len), Some(64));
}

#[test]
fn csv_blank_title_rows_keep_data_rows_in_place() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("Attributes.csv"),
        "\n\n#,ID,Name,Short,Type,Description\n,A1,age,,Integer,\n,A2,city,,CityCodes,\n",
    );
    write(&dir.path().join("CityCodes.csv"), "\n\nh\n,5,,Berlin\n\n,6,, Paris \n");

    let taxonomy = Taxonomy::load(dir.path()).expect("load csv taxonomy");

    let ids: Vec<&str> = taxonomy.attributes().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["A1", "A2"]);
    assert_eq!(taxonomy.dictionaries().lookup("CityCodes", "5"), Some("Berlin"));
    assert_eq!(taxonomy.dictionaries().lookup("CityCodes", "6"), Some("Paris"));
}

#[test]
fn csv_fingerprint_tracks_content() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("Attributes.csv"), "h\nh\nh\n,A1,age,,Integer,\n");
    let first = Taxonomy::load(dir.path()).unwrap();

    write(&dir.path().join("Attributes.csv"), "h\nh\nh\n,A1,years,,Integer,\n");
    let second = Taxonomy::load(dir.path()).unwrap();

    assert_ne!(first.fingerprint(), second.fingerprint());
}

#[test]
fn empty_csv_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = Taxonomy::load(dir.path()).unwrap_err();
    assert!(matches!(error, DocumentError::Empty { .. }));
}

#[test]
fn missing_file_is_an_error() {
    let error = Taxonomy::load(&fixture("does-not-exist.xlsx")).unwrap_err();
    assert!(matches!(error, DocumentError::Io { .. }));
}

#[test]
fn unreadable_workbook_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    write(&path, "this is not a workbook");

    let error = Taxonomy::load(&path).unwrap_err();
    assert!(matches!(error, DocumentError::Workbook { .. }));
}

#[test]
fn loads_workbook_fixture() {
    let path = fixture("taxonomy.xlsx");
    let document = Document::open(&path).expect("open workbook");
    let names: Vec<&str> = document.sheet_names().collect();
    assert_eq!(
        names,
        ["Notes", "Attributes", "CityCodes", "Hobbies", "EmptyCodes", "types"]
    );

    let taxonomy = Taxonomy::from_document(&document).expect("load taxonomy");
    let ids: Vec<&str> = taxonomy.attributes().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["A1", "A2", "A3", "A1", "101", "A5", "A6"]);
    assert_eq!(taxonomy.attribute("A1").unwrap().name, "sd_age_estimated");
    assert_eq!(taxonomy.attribute("101").unwrap().name, "numeric_id");

    let dictionaries = taxonomy.dictionaries();
    let names: Vec<&str> = dictionaries.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["CityCodes", "EmptyCodes", "Hobbies"]);
    assert_eq!(dictionaries.lookup("CityCodes", "5"), Some("Berlin"));
    assert_eq!(dictionaries.lookup("CityCodes", "6"), Some("Отсутствует"));
    assert_eq!(dictionaries.lookup("CityCodes", "7"), Some("0"));
    assert_eq!(dictionaries.lookup("CityCodes", "8"), Some("2.5"));
    assert_eq!(dictionaries.lookup("Hobbies", "h2"), Some("Go"));
    assert!(dictionaries.get("EmptyCodes").unwrap().is_empty());
    assert!(!dictionaries.contains_type("Notes"));
}

#[test]
fn workbook_fingerprint_is_file_digest() {
    let path = fixture("taxonomy.xlsx");
    let bytes = fs::read(&path).unwrap();
    let taxonomy = Taxonomy::load(&path).expect("load taxonomy");

    assert_eq!(
        taxonomy.fingerprint(),
        Some(dmp_taxonomy::hash::sha256_hex(&bytes).as_str())
    );
}

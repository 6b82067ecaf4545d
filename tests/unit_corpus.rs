// Unit tests for the CSV data source and project discovery.
//
// Uses temporary files; nothing outside the temp dir is touched.

use std::fs;
use std::io::Write;

use reviewrank::corpus::reader::{discover_projects, read_records, TESTING_FILE, TRAINING_FILE};
use reviewrank::corpus::record::{Query, RawRecord};
use reviewrank::error::DegenerateInput;
use reviewrank::text::stem::StemmingNormalizer;

const SAMPLE: &str = "\
COMMENT,not a pull request,,,,,
PR,Scheduler deadlock,threads block forever,,\"alice,bob\",2021-05-01 10:00:00,2021-05-02 10:00:00
PR,too short,row
PR,Parser grammar,,,carol,2021-05-03 10:00:00,2021-05-04 10:00:00,extra,fields
";

fn write_temp(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file
}

// ============================================================
// read_records
// ============================================================

#[test]
fn reads_only_submission_rows() {
    let file = write_temp(SAMPLE.as_bytes());
    let batch = read_records(file.path(), None).unwrap();

    assert_eq!(batch.rows_read, 4);
    assert_eq!(batch.malformed, 1);
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.records[0].authors, "alice,bob");
    assert_eq!(batch.records[1].title, "Parser grammar");
    assert_eq!(batch.records[1].ended_at, "2021-05-04 10:00:00");
}

#[test]
fn row_limit_counts_every_row() {
    let file = write_temp(SAMPLE.as_bytes());
    let batch = read_records(file.path(), Some(2)).unwrap();
    assert_eq!(batch.rows_read, 2);
    assert_eq!(batch.records.len(), 1);
}

#[test]
fn invalid_utf8_bytes_are_dropped() {
    let mut contents = b"PR,Cache eviction,,,ali".to_vec();
    contents.push(0xff);
    contents.extend_from_slice(b"ce,2021-05-01 10:00:00,2021-05-02 10:00:00\n");
    let file = write_temp(&contents);

    let batch = read_records(file.path(), None).unwrap();
    assert_eq!(batch.records[0].authors, "alice");
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_records(&dir.path().join("nope.csv"), None).is_err());
}

// ============================================================
// Records to queries
// ============================================================

#[test]
fn query_from_non_ascii_authors_is_degenerate() {
    let record = RawRecord::from_fields(&[
        "PR",
        "Scheduler deadlock",
        "",
        "",
        "zoë",
        "",
        "",
    ])
    .unwrap();
    let err = Query::from_record(&record, &StemmingNormalizer::new()).unwrap_err();
    assert_eq!(err, DegenerateInput::NonAsciiAuthors);
}

#[test]
fn query_with_only_stop_words_is_degenerate() {
    let err = Query::new("please fix the test", "thanks", "alice", &StemmingNormalizer::new())
        .unwrap_err();
    assert_eq!(err, DegenerateInput::EmptyContent);
}

// ============================================================
// discover_projects
// ============================================================

#[test]
fn discovers_nested_projects_with_both_files() {
    let archive = tempfile::tempdir().unwrap();
    let complete = archive.path().join("org").join("alpha");
    let partial = archive.path().join("beta");
    fs::create_dir_all(&complete).unwrap();
    fs::create_dir_all(&partial).unwrap();
    fs::write(complete.join(TRAINING_FILE), SAMPLE).unwrap();
    fs::write(complete.join(TESTING_FILE), SAMPLE).unwrap();
    fs::write(partial.join(TRAINING_FILE), SAMPLE).unwrap();

    let projects = discover_projects(archive.path()).unwrap();
    assert_eq!(projects.len(), 1);
    assert!(projects[0].name.ends_with("alpha"));
    assert_eq!(projects[0].testing, complete.join(TESTING_FILE));
}

#[test]
fn missing_archive_is_an_error() {
    let archive = tempfile::tempdir().unwrap();
    assert!(discover_projects(&archive.path().join("absent")).is_err());
}

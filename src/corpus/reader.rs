// CSV data source for training and testing exports.
//
// Exports are headerless, rows vary in width, and text fields are not
// guaranteed to be valid UTF-8. Undecodable bytes are dropped rather than
// replaced, so a mangled author name fails the ASCII check instead of
// silently turning into a different name.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{ByteRecord, ReaderBuilder};
use tracing::{debug, warn};

use super::record::{RawRecord, SUBMISSION_TAG};

pub const TRAINING_FILE: &str = "training_data.csv";
pub const TESTING_FILE: &str = "testing_data.csv";

/// Submission records read from one file.
#[derive(Debug, Default)]
pub struct RecordBatch {
    pub records: Vec<RawRecord>,
    /// Rows tagged as submissions that were too short to parse.
    pub malformed: usize,
    /// Rows read from the file, submissions or not.
    pub rows_read: usize,
}

fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).replace('\u{FFFD}', ""),
    }
}

fn decode_row(row: &ByteRecord) -> Vec<String> {
    row.iter().map(decode_field).collect()
}

/// Read submission records from a CSV file.
///
/// `max_rows` caps how many rows are read (every row counts, submission or
/// not). Rows whose first field is not the submission tag are skipped.
pub fn read_records(path: &Path, max_rows: Option<usize>) -> Result<RecordBatch> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut batch = RecordBatch::default();
    let mut row = ByteRecord::new();

    loop {
        if max_rows.is_some_and(|max| batch.rows_read >= max) {
            break;
        }
        let more = reader
            .read_byte_record(&mut row)
            .with_context(|| format!("Failed to read row {} of {}", batch.rows_read, path.display()))?;
        if !more {
            break;
        }
        batch.rows_read += 1;

        let fields = decode_row(&row);
        if fields.first().map(String::as_str) != Some(SUBMISSION_TAG) {
            continue;
        }
        match RawRecord::from_fields(&fields) {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                warn!(row = batch.rows_read - 1, error = %e, "Skipping malformed submission row");
                batch.malformed += 1;
            }
        }
    }

    debug!(
        path = %path.display(),
        rows = batch.rows_read,
        records = batch.records.len(),
        "Read submission records"
    );
    Ok(batch)
}

/// A project directory holding a training and a testing export.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    pub training: PathBuf,
    pub testing: PathBuf,
}

/// Find every directory under `archive` (at any depth) that holds both
/// exports. Results are sorted by path.
pub fn discover_projects(archive: &Path) -> Result<Vec<Project>> {
    if !archive.is_dir() {
        anyhow::bail!("Archive directory {} does not exist", archive.display());
    }

    let mut projects = Vec::new();
    let mut pending = vec![archive.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries =
            fs::read_dir(&dir).with_context(|| format!("Failed to list {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let training = path.join(TRAINING_FILE);
            let testing = path.join(TESTING_FILE);
            if training.is_file() && testing.is_file() {
                let name = path
                    .strip_prefix(archive)
                    .unwrap_or(&path)
                    .display()
                    .to_string();
                projects.push(Project {
                    name,
                    training,
                    testing,
                });
            }
            pending.push(path);
        }
    }

    projects.sort_by(|a, b| a.training.cmp(&b.training));
    Ok(projects)
}

// Corpus records: raw rows and the typed submissions derived from them.
//
// A row from the data source is first parsed into a `RawRecord` (plain
// strings, positional fields). Normalization then produces a separate
// `Submission` (training) or `Query` (scoring) value; the raw record is
// never rewritten in place.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::DegenerateInput;
use crate::text::is_ascii_text;
use crate::text::traits::Normalizer;

/// Tag in field 0 marking a row as a submission.
pub const SUBMISSION_TAG: &str = "PR";

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minimum positional fields a submission row carries.
pub const MIN_FIELDS: usize = 7;

/// One positional row exactly as the data source produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub kind: String,
    pub title: String,
    pub body: String,
    /// Field 3 is reserved and never read by the engine.
    pub reserved: String,
    /// Comma-separated author names, contributor first.
    pub authors: String,
    pub started_at: String,
    pub ended_at: String,
}

impl RawRecord {
    /// Build a record from positional fields. Extra trailing fields are ignored.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, DegenerateInput> {
        if fields.len() < MIN_FIELDS {
            return Err(DegenerateInput::MissingFields {
                found: fields.len(),
            });
        }
        let field = |i: usize| fields[i].as_ref().to_string();
        Ok(Self {
            kind: field(0),
            title: field(1),
            body: field(2),
            reserved: field(3),
            authors: field(4),
            started_at: field(5),
            ended_at: field(6),
        })
    }

    pub fn is_submission(&self) -> bool {
        self.kind == SUBMISSION_TAG
    }
}

/// Split an author-list field on commas. Names are kept byte-exact.
pub fn split_authors(field: &str) -> Vec<String> {
    field.split(',').map(str::to_string).collect()
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp into UTC epoch seconds.
pub fn parse_timestamp(value: &str) -> Result<i64, DegenerateInput> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|_| DegenerateInput::BadTimestamp {
            value: value.to_string(),
        })
}

/// Normalized content plus the author list, shared by training and query paths.
fn normalize_parts(
    title: &str,
    body: &str,
    authors: &str,
    normalizer: &dyn Normalizer,
) -> Result<(Vec<String>, Vec<String>), DegenerateInput> {
    let tokens = normalizer.normalize(title, body);
    if tokens.is_empty() {
        return Err(DegenerateInput::EmptyContent);
    }
    if !is_ascii_text(authors) {
        return Err(DegenerateInput::NonAsciiAuthors);
    }
    Ok((tokens, split_authors(authors)))
}

/// A training submission after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Retained stems, in text order, repeats included.
    pub tokens: Vec<String>,
    /// Author names, contributor first. May contain repeats.
    pub authors: Vec<String>,
    pub started_at: i64,
    pub ended_at: i64,
}

impl Submission {
    pub fn from_record(
        record: &RawRecord,
        normalizer: &dyn Normalizer,
    ) -> Result<Self, DegenerateInput> {
        let (tokens, authors) =
            normalize_parts(&record.title, &record.body, &record.authors, normalizer)?;
        Ok(Self {
            tokens,
            authors,
            started_at: parse_timestamp(&record.started_at)?,
            ended_at: parse_timestamp(&record.ended_at)?,
        })
    }

    /// The primary author: first entry of the author list.
    pub fn contributor(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }
}

/// An incoming submission to recommend reviewers for.
///
/// Timestamps are not needed for scoring, so a query is never rejected
/// because of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub tokens: Vec<String>,
    pub authors: Vec<String>,
}

impl Query {
    pub fn new(
        title: &str,
        body: &str,
        authors: &str,
        normalizer: &dyn Normalizer,
    ) -> Result<Self, DegenerateInput> {
        let (tokens, authors) = normalize_parts(title, body, authors, normalizer)?;
        Ok(Self { tokens, authors })
    }

    pub fn from_record(
        record: &RawRecord,
        normalizer: &dyn Normalizer,
    ) -> Result<Self, DegenerateInput> {
        Self::new(&record.title, &record.body, &record.authors, normalizer)
    }

    pub fn contributor(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Whitespace;

    impl Normalizer for Whitespace {
        fn normalize(&self, title: &str, body: &str) -> Vec<String> {
            title
                .split_whitespace()
                .chain(body.split_whitespace())
                .map(str::to_string)
                .collect()
        }
    }

    fn record(authors: &str, body: &str) -> RawRecord {
        RawRecord::from_fields(&[
            "PR",
            "title",
            body,
            "",
            authors,
            "2020-01-01 00:00:00",
            "2020-01-02 12:30:00",
        ])
        .unwrap()
    }

    #[test]
    fn test_from_fields_too_short() {
        let err = RawRecord::from_fields(&["PR", "t", "b"]).unwrap_err();
        assert_eq!(err, DegenerateInput::MissingFields { found: 3 });
    }

    #[test]
    fn test_parse_timestamp_utc() {
        assert_eq!(parse_timestamp("1970-01-02 00:00:00").unwrap(), 86_400);
        assert!(parse_timestamp("2020/01/01").is_err());
    }

    #[test]
    fn test_submission_from_record() {
        let sub = Submission::from_record(&record("alice,bob", "body words"), &Whitespace).unwrap();
        assert_eq!(sub.tokens, vec!["title", "body", "words"]);
        assert_eq!(sub.authors, vec!["alice", "bob"]);
        assert_eq!(sub.contributor(), Some("alice"));
        assert_eq!(sub.ended_at - sub.started_at, 86_400 + 12 * 3600 + 30 * 60);
    }

    #[test]
    fn test_non_ascii_authors_rejected() {
        let err = Submission::from_record(&record("zoë,bob", "x"), &Whitespace).unwrap_err();
        assert_eq!(err, DegenerateInput::NonAsciiAuthors);
    }

    #[test]
    fn test_query_ignores_timestamps() {
        let mut rec = record("alice", "x");
        rec.ended_at = "garbage".to_string();
        assert!(Submission::from_record(&rec, &Whitespace).is_err());
        assert!(Query::from_record(&rec, &Whitespace).is_ok());
    }
}

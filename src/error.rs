// Error taxonomy for the recommendation engine.
//
// Record-level problems (a malformed row, an author missing from the
// registry) are recoverable: the caller logs them and moves on to the next
// record. Only an empty corpus or a bad configuration ends a session.

use thiserror::Error;

/// Why a single record was excluded from training or scoring.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DegenerateInput {
    #[error("no content left after normalization")]
    EmptyContent,
    #[error("author list is empty or contains non-ASCII text")]
    NonAsciiAuthors,
    #[error("record has {found} fields, at least 7 are required")]
    MissingFields { found: usize },
    #[error("timestamp {value:?} is not in YYYY-MM-DD HH:MM:SS form")]
    BadTimestamp { value: String },
    #[error("time window is empty (baseline {baseline}, deadline {deadline})")]
    TimeWindow { baseline: f64, deadline: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// An author on a training submission is missing from the registry.
    /// Means the registry and the corpus went out of sync.
    #[error("author {name:?} on training submission {submission} is not in the registry")]
    DataIntegrity { name: String, submission: usize },

    #[error("degenerate input: {0}")]
    Degenerate(#[from] DegenerateInput),

    #[error("training corpus has no usable submissions")]
    EmptyCorpus,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Fatal errors end the whole training/scoring session; the rest only
    /// cost a single record.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::EmptyCorpus | EngineError::InvalidConfig(_))
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(EngineError::EmptyCorpus.is_fatal());
        assert!(EngineError::InvalidConfig("k".into()).is_fatal());
        assert!(!EngineError::Degenerate(DegenerateInput::EmptyContent).is_fatal());
        assert!(!EngineError::DataIntegrity {
            name: "alice".into(),
            submission: 3
        }
        .is_fatal());
    }

    #[test]
    fn test_degenerate_converts_into_engine_error() {
        let err: EngineError = DegenerateInput::NonAsciiAuthors.into();
        assert_eq!(err, EngineError::Degenerate(DegenerateInput::NonAsciiAuthors));
    }
}

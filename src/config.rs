use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::scoring::params::ScoringParams;

/// Rows of each testing export read during evaluation, unless overridden.
pub const DEFAULT_TEST_ROWS: usize = 101;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// value has a default, so an empty environment is a valid setup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one sub-directory per project
    /// (REVIEWRANK_ARCHIVE_DIR, default ./archive)
    pub archive_dir: PathBuf,
    /// Rows of each testing file to read; `None` reads the whole file
    /// (REVIEWRANK_TEST_ROWS, 0 = unlimited)
    pub test_rows: Option<usize>,
    pub scoring: ScoringParams,
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let defaults = ScoringParams::default();

        let test_rows = match parse_var("REVIEWRANK_TEST_ROWS", DEFAULT_TEST_ROWS)? {
            0 => None,
            n => Some(n),
        };

        Ok(Self {
            archive_dir: env::var("REVIEWRANK_ARCHIVE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./archive")),
            test_rows,
            scoring: ScoringParams {
                top_k: parse_var("REVIEWRANK_TOP_K", defaults.top_k)?,
                decay: parse_var("REVIEWRANK_DECAY", defaults.decay)?,
                relation_weight: parse_var("REVIEWRANK_RELATION_WEIGHT", defaults.relation_weight)?,
                baseline_margin_secs: defaults.baseline_margin_secs,
            },
        })
    }

    /// Apply a command-line override for K.
    pub fn with_top_k(mut self, top_k: Option<usize>) -> Self {
        if let Some(k) = top_k {
            self.scoring.top_k = k;
        }
        self
    }

    /// Check the scoring parameters. Call this before training anything:
    /// a bad K or decay is fatal for every project.
    pub fn validate(&self) -> Result<()> {
        self.scoring
            .validate()
            .context("Check the REVIEWRANK_* variables in your .env file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_top_k_override() {
        let config = Config {
            archive_dir: PathBuf::from("./archive"),
            test_rows: Some(DEFAULT_TEST_ROWS),
            scoring: ScoringParams::default(),
        };
        assert_eq!(config.clone().with_top_k(None).scoring.top_k, 5);
        assert_eq!(config.with_top_k(Some(10)).scoring.top_k, 10);
    }

    #[test]
    fn test_validate_rejects_zero_k() {
        let config = Config {
            archive_dir: PathBuf::from("./archive"),
            test_rows: None,
            scoring: ScoringParams::default(),
        }
        .with_top_k(Some(0));
        assert!(config.validate().is_err());
    }
}

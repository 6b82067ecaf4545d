// Tunable parameters for training and recommendation.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Knobs shared by the relation network and the recommender.
///
/// `score(author) = sum of top-K similarities of submissions they are on
///                  + relation(contributor -> author)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    /// How many similar submissions to draw from, and how many authors to
    /// return (default 5).
    pub top_k: usize,
    /// Geometric decay for repeat appearances in one author list (default 0.8).
    pub decay: f64,
    /// Scale of every relation contribution (default 1.0).
    pub relation_weight: f64,
    /// How far before the earliest start the time window opens (default 24h).
    pub baseline_margin_secs: i64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            top_k: 5,
            decay: 0.8,
            relation_weight: 1.0,
            baseline_margin_secs: 24 * 3600,
        }
    }
}

impl ScoringParams {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.top_k == 0 {
            return Err(EngineError::InvalidConfig("top_k must be at least 1".into()));
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(EngineError::InvalidConfig(format!(
                "decay must be in (0, 1], got {}",
                self.decay
            )));
        }
        if !(self.relation_weight > 0.0) || !self.relation_weight.is_finite() {
            return Err(EngineError::InvalidConfig(format!(
                "relation weight must be positive, got {}",
                self.relation_weight
            )));
        }
        if self.baseline_margin_secs < 0 {
            return Err(EngineError::InvalidConfig(format!(
                "baseline margin must not be negative, got {}",
                self.baseline_margin_secs
            )));
        }
        Ok(())
    }
}

// Common collaboration network: directed, decayed, time-weighted affinity.
//
// For every training submission with at least two authors, the contributor
// (first author) gains affinity towards every listed author, itself
// included:
//
//   matrix[contributor][participant] += decay^k * relation_weight * t
//
// where k is how many times that participant already appeared earlier in
// the same author list, and t places the submission's end time inside the
// corpus time window (0.0 at the baseline, 1.0 at the deadline).

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::authors::AuthorRegistry;
use crate::corpus::record::Submission;
use crate::error::{DegenerateInput, EngineError};
use crate::scoring::params::ScoringParams;

/// Baseline/deadline pair used to normalize submission end times.
/// Always satisfies `deadline > baseline`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeWindow {
    baseline: f64,
    deadline: f64,
}

impl TimeWindow {
    pub fn new(baseline: f64, deadline: f64) -> Result<Self, DegenerateInput> {
        // Also rejects NaN bounds.
        if !(deadline > baseline) {
            return Err(DegenerateInput::TimeWindow { baseline, deadline });
        }
        Ok(Self { baseline, deadline })
    }

    /// Window spanning a training corpus: earliest start minus `margin_secs`
    /// up to the latest end.
    pub fn spanning(submissions: &[Submission], margin_secs: i64) -> Result<Self, EngineError> {
        let earliest = submissions.iter().map(|s| s.started_at).min();
        let latest = submissions.iter().map(|s| s.ended_at).max();
        match (earliest, latest) {
            (Some(start), Some(end)) => {
                Ok(Self::new((start - margin_secs) as f64, end as f64)?)
            }
            _ => Err(EngineError::EmptyCorpus),
        }
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn deadline(&self) -> f64 {
        self.deadline
    }

    /// Position of `at` inside the window, clamped to `[0, 1]`. An end time
    /// before the baseline (reversed start/end) scores 0.
    pub fn time_score(&self, at: f64) -> f64 {
        ((at - self.baseline) / (self.deadline - self.baseline)).clamp(0.0, 1.0)
    }
}

/// Square author-by-author score table, indexed by registry position.
/// Not symmetric: row = contributor, column = participant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelationMatrix {
    size: usize,
    scores: Vec<f64>,
}

/// A built matrix plus the records that could not be resolved.
#[derive(Debug, Clone)]
pub struct RelationBuild {
    pub matrix: RelationMatrix,
    pub integrity_errors: Vec<EngineError>,
}

impl RelationMatrix {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            scores: vec![0.0; size * size],
        }
    }

    /// Build the network from the retained training submissions.
    ///
    /// A submission naming an author the registry does not know is skipped
    /// as a whole and reported in `integrity_errors`.
    pub fn build(
        submissions: &[Submission],
        registry: &AuthorRegistry,
        window: &TimeWindow,
        params: &ScoringParams,
    ) -> RelationBuild {
        let mut matrix = Self::zeros(registry.len());
        let mut integrity_errors = Vec::new();

        for (id, submission) in submissions.iter().enumerate() {
            if submission.authors.len() < 2 {
                continue;
            }

            let ids = match resolve_authors(submission, id, registry) {
                Ok(ids) => ids,
                Err(e) => {
                    warn!(error = %e, "Skipping submission in relation network");
                    integrity_errors.push(e);
                    continue;
                }
            };

            let contributor = ids[0];
            let t = window.time_score(submission.ended_at as f64);
            let mut appearances: HashMap<usize, i32> = HashMap::new();

            for &participant in &ids {
                let seen = appearances.entry(participant).or_insert(0);
                let decay = params.decay.powi(*seen);
                *seen += 1;
                *matrix.get_mut(contributor, participant) += decay * params.relation_weight * t;
            }
        }

        debug!(
            authors = matrix.size,
            skipped = integrity_errors.len(),
            "Built relation matrix"
        );
        RelationBuild {
            matrix,
            integrity_errors,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.scores[from * self.size + to]
    }

    fn get_mut(&mut self, from: usize, to: usize) -> &mut f64 {
        &mut self.scores[from * self.size + to]
    }

    /// Scores from `from` towards every author.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.scores[from * self.size..(from + 1) * self.size]
    }

    /// The `n` largest off-diagonal entries as `(from, to, score)`, highest first.
    pub fn strongest(&self, n: usize) -> Vec<(usize, usize, f64)> {
        let mut entries: Vec<(usize, usize, f64)> = (0..self.size)
            .flat_map(|i| (0..self.size).map(move |j| (i, j)))
            .filter(|&(i, j)| i != j)
            .map(|(i, j)| (i, j, self.get(i, j)))
            .filter(|&(_, _, s)| s > 0.0)
            .collect();
        entries.sort_by(|a, b| b.2.total_cmp(&a.2));
        entries.truncate(n);
        entries
    }
}

fn resolve_authors(
    submission: &Submission,
    id: usize,
    registry: &AuthorRegistry,
) -> Result<Vec<usize>, EngineError> {
    submission
        .authors
        .iter()
        .map(|name| {
            registry
                .index_of(name)
                .ok_or_else(|| EngineError::DataIntegrity {
                    name: name.clone(),
                    submission: id,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_rejects_empty_span() {
        assert!(TimeWindow::new(10.0, 10.0).is_err());
        assert!(TimeWindow::new(10.0, 5.0).is_err());
        assert!(TimeWindow::new(f64::NAN, 5.0).is_err());
    }

    #[test]
    fn test_time_score_bounds() {
        let w = TimeWindow::new(100.0, 300.0).unwrap();
        assert_eq!(w.time_score(100.0), 0.0);
        assert_eq!(w.time_score(200.0), 0.5);
        assert_eq!(w.time_score(300.0), 1.0);
        assert_eq!(w.time_score(40.0), 0.0);
        assert_eq!(w.time_score(500.0), 1.0);
    }

    #[test]
    fn test_row_and_get_agree() {
        let mut m = RelationMatrix::zeros(3);
        *m.get_mut(1, 2) = 4.0;
        assert_eq!(m.get(1, 2), 4.0);
        assert_eq!(m.row(1), &[0.0, 0.0, 4.0]);
        assert_eq!(m.get(2, 1), 0.0);
    }

    #[test]
    fn test_strongest_skips_diagonal() {
        let mut m = RelationMatrix::zeros(2);
        *m.get_mut(0, 0) = 9.0;
        *m.get_mut(0, 1) = 1.0;
        assert_eq!(m.strongest(5), vec![(0, 1, 1.0)]);
    }
}

// Evaluation harness: precision and recall over held-out submissions.
//
// For each test submission the recommender predicts up to K authors. A
// prediction is correct when the author appears on the submission's own
// author list. Precision is correct / predicted, recall is
// correct / (distinct true authors).

use std::collections::HashSet;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::corpus::reader::{read_records, Project};
use crate::corpus::record::{Query, RawRecord};
use crate::error::EngineError;
use crate::scoring::engine::{recommend, Recommendation};
use crate::scoring::params::ScoringParams;
use crate::session::{TrainReport, TrainingSession};
use crate::text::traits::Normalizer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EvalCounts {
    /// Test submissions that were scored.
    pub scored: usize,
    /// Test submissions excluded as degenerate.
    pub skipped: usize,
    pub predicted: usize,
    pub correct: usize,
    pub actual: usize,
}

impl EvalCounts {
    /// Fold one scored query into the counts.
    pub fn record(&mut self, predictions: &[Recommendation], truth: &[String]) {
        self.scored += 1;
        self.predicted += predictions.len();
        self.correct += predictions
            .iter()
            .filter(|p| truth.iter().any(|t| *t == p.author))
            .count();
        self.actual += truth.iter().collect::<HashSet<_>>().len();
    }

    pub fn merge(&mut self, other: &EvalCounts) {
        self.scored += other.scored;
        self.skipped += other.skipped;
        self.predicted += other.predicted;
        self.correct += other.correct;
        self.actual += other.actual;
    }

    /// `None` when nothing was predicted.
    pub fn precision(&self) -> Option<f64> {
        ratio(self.correct, self.predicted)
    }

    /// `None` when there were no true authors to find.
    pub fn recall(&self) -> Option<f64> {
        ratio(self.correct, self.actual)
    }
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

/// Score every test submission against a trained session.
pub fn evaluate(
    session: &TrainingSession,
    records: &[RawRecord],
    normalizer: &dyn Normalizer,
) -> Result<EvalCounts, EngineError> {
    let mut counts = EvalCounts::default();

    for record in records.iter().filter(|r| r.is_submission()) {
        let query = match Query::from_record(record, normalizer) {
            Ok(q) => q,
            Err(e) => {
                debug!(error = %e, title = %record.title, "Skipping test record");
                counts.skipped += 1;
                continue;
            }
        };
        let predictions = recommend(session, &query)?;
        counts.record(&predictions, &query.authors);
    }

    Ok(counts)
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub name: String,
    pub training: TrainReport,
    pub counts: EvalCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedProject {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveReport {
    pub projects: Vec<ProjectReport>,
    pub failed: Vec<FailedProject>,
    /// Counts pooled over every evaluated project.
    pub total: EvalCounts,
}

/// Train on a project's training export and evaluate on its testing export.
///
/// `test_rows` caps how many rows of the testing file are read.
pub fn evaluate_project(
    project: &Project,
    params: &ScoringParams,
    test_rows: Option<usize>,
    normalizer: &dyn Normalizer,
) -> Result<ProjectReport> {
    let training = read_records(&project.training, None)?;
    let mut session = TrainingSession::new(params.clone())?;
    let training_report = session
        .train(&training.records, normalizer)
        .with_context(|| format!("Training failed for {}", project.name))?
        .clone();

    let testing = read_records(&project.testing, test_rows)?;
    let counts = evaluate(&session, &testing.records, normalizer)
        .with_context(|| format!("Evaluation failed for {}", project.name))?;

    info!(
        project = %project.name,
        scored = counts.scored,
        precision = counts.precision().unwrap_or(0.0),
        recall = counts.recall().unwrap_or(0.0),
        "Project evaluated"
    );

    Ok(ProjectReport {
        name: project.name.clone(),
        training: training_report,
        counts,
    })
}

/// Evaluate every project in turn. A project that cannot be trained or
/// read is reported as failed and the run moves on.
pub fn evaluate_archive(
    projects: &[Project],
    params: &ScoringParams,
    test_rows: Option<usize>,
    normalizer: &dyn Normalizer,
) -> Result<ArchiveReport> {
    params.validate()?;

    let pb = ProgressBar::new(projects.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Projects [{bar:30}] {pos}/{len} {msg}")
            .unwrap(),
    );

    let mut report = ArchiveReport::default();
    for project in projects {
        pb.set_message(project.name.clone());
        match evaluate_project(project, params, test_rows, normalizer) {
            Ok(project_report) => {
                report.total.merge(&project_report.counts);
                report.projects.push(project_report);
            }
            Err(e) => {
                warn!(project = %project.name, error = %e, "Project skipped");
                report.failed.push(FailedProject {
                    name: project.name.clone(),
                    error: format!("{e:#}"),
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(report)
}

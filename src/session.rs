// Training session: all state derived from one training corpus.
//
// The registry, vocabulary, vectors and relation matrix share index spaces,
// so they are only ever rebuilt together: `train` clears everything and
// derives it again from the new corpus. Scoring borrows the session
// immutably; one session serves one corpus at a time.

use serde::Serialize;
use tracing::{info, warn};

use crate::authors::{Author, AuthorRegistry};
use crate::corpus::record::{RawRecord, Submission};
use crate::error::EngineError;
use crate::relations::{RelationMatrix, TimeWindow};
use crate::scoring::params::ScoringParams;
use crate::text::traits::Normalizer;
use crate::vector::tfidf::tfidf;
use crate::vector::vocabulary::Vocabulary;

/// What happened to the records handed to `train`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrainReport {
    /// Submission records offered for training.
    pub records: usize,
    /// Records kept as training submissions.
    pub retained: usize,
    /// Records excluded for empty content, bad author text or bad timestamps.
    pub degenerate: usize,
    /// Retained submissions left out of the relation network because an
    /// author could not be resolved.
    pub integrity_errors: usize,
}

#[derive(Debug, Clone)]
pub struct TrainingSession {
    params: ScoringParams,
    submissions: Vec<Submission>,
    registry: AuthorRegistry,
    vocabulary: Vocabulary,
    vectors: Vec<Vec<f64>>,
    relations: RelationMatrix,
    window: Option<TimeWindow>,
    report: TrainReport,
}

impl TrainingSession {
    pub fn new(params: ScoringParams) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self {
            params,
            submissions: Vec::new(),
            registry: AuthorRegistry::new(),
            vocabulary: Vocabulary::new(),
            vectors: Vec::new(),
            relations: RelationMatrix::default(),
            window: None,
            report: TrainReport::default(),
        })
    }

    /// Drop everything learned from the previous corpus.
    pub fn reset(&mut self) {
        self.submissions.clear();
        self.registry.clear();
        self.vocabulary.clear();
        self.vectors.clear();
        self.relations = RelationMatrix::default();
        self.window = None;
        self.report = TrainReport::default();
    }

    /// Train on a batch of raw records, replacing any previous corpus.
    ///
    /// Rows that are not submissions are ignored. Degenerate records are
    /// logged and skipped. Fails with `EmptyCorpus` when nothing usable is
    /// left; the session is then empty.
    pub fn train(
        &mut self,
        records: &[RawRecord],
        normalizer: &dyn Normalizer,
    ) -> Result<&TrainReport, EngineError> {
        self.reset();
        let mut report = TrainReport::default();

        for record in records.iter().filter(|r| r.is_submission()) {
            report.records += 1;
            let submission = match Submission::from_record(record, normalizer) {
                Ok(s) => s,
                Err(e) => {
                    warn!(error = %e, title = %record.title, "Skipping training record");
                    report.degenerate += 1;
                    continue;
                }
            };

            let id = self.submissions.len();
            for name in &submission.authors {
                self.registry.add(Author::with_submission(name.as_str(), id));
            }
            self.vocabulary.add_document(&submission.tokens);
            self.submissions.push(submission);
        }

        if self.submissions.is_empty() {
            self.reset();
            return Err(EngineError::EmptyCorpus);
        }

        let window = match TimeWindow::spanning(&self.submissions, self.params.baseline_margin_secs)
        {
            Ok(w) => w,
            Err(e) => {
                self.reset();
                return Err(e);
            }
        };

        let corpus_size = self.submissions.len();
        self.vectors = tfidf(
            self.submissions.iter().map(|s| s.tokens.as_slice()),
            &self.vocabulary,
            corpus_size,
        );

        let build = RelationMatrix::build(&self.submissions, &self.registry, &window, &self.params);
        report.integrity_errors = build.integrity_errors.len();
        report.retained = corpus_size;

        self.relations = build.matrix;
        self.window = Some(window);
        self.report = report;

        info!(
            submissions = corpus_size,
            skipped = self.report.degenerate,
            authors = self.registry.len(),
            vocabulary = self.vocabulary.len(),
            "Training complete"
        );
        Ok(&self.report)
    }

    pub fn is_trained(&self) -> bool {
        !self.submissions.is_empty()
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn registry(&self) -> &AuthorRegistry {
        &self.registry
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// One TF-IDF vector per training submission, in submission order.
    pub fn vectors(&self) -> &[Vec<f64>] {
        &self.vectors
    }

    pub fn relations(&self) -> &RelationMatrix {
        &self.relations
    }

    pub fn window(&self) -> Option<&TimeWindow> {
        self.window.as_ref()
    }

    pub fn report(&self) -> &TrainReport {
        &self.report
    }
}

// Reviewer recommendation for one incoming submission.
//
// Two signals are summed per author:
//   1. Expertise: the query is compared (cosine over TF-IDF) with every
//      training submission; each of the K most similar ones adds its
//      similarity to every author on its list.
//   2. Common network: the relation score from the query's contributor
//      to the author, when the contributor is known.
// The K best authors are returned, best first.

use serde::Serialize;
use tracing::debug;

use crate::authors::AuthorRegistry;
use crate::corpus::record::{Query, Submission};
use crate::error::{DegenerateInput, EngineError};
use crate::session::TrainingSession;
use crate::vector::similarity::cosine_similarity;
use crate::vector::tfidf::tfidf_vector;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub author: String,
    /// Registry index of the author in the session that produced this.
    pub index: usize,
    pub score: f64,
}

/// The last `k` of `(score, index)` pairs sorted ascending by score, then index.
///
/// Returned in ascending order, so the best pair is last.
pub fn top_k(scores: &[f64], k: usize) -> Vec<(f64, usize)> {
    let mut packed: Vec<(f64, usize)> = scores.iter().copied().zip(0..).collect();
    packed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    let start = packed.len().saturating_sub(k);
    packed.split_off(start)
}

/// Add each neighbour's similarity to every author on its list.
///
/// Neighbours with similarity exactly 0.0 still occupy their top-K slot
/// but add nothing. Repeated names on one list are credited once per
/// appearance; names missing from the registry are passed over.
pub fn accumulate_expertise(
    neighbours: &[(f64, usize)],
    submissions: &[Submission],
    registry: &AuthorRegistry,
    totals: &mut [f64],
) {
    for &(similarity, id) in neighbours {
        if similarity == 0.0 {
            continue;
        }
        for name in &submissions[id].authors {
            if let Some(author) = registry.index_of(name) {
                totals[author] += similarity;
            }
        }
    }
}

/// Rank authors for `query` against a trained session.
pub fn recommend(
    session: &TrainingSession,
    query: &Query,
) -> Result<Vec<Recommendation>, EngineError> {
    if !session.is_trained() {
        return Err(EngineError::EmptyCorpus);
    }
    if query.tokens.is_empty() {
        return Err(DegenerateInput::EmptyContent.into());
    }
    let Some(contributor) = query.contributor() else {
        return Err(DegenerateInput::NonAsciiAuthors.into());
    };

    let k = session.params().top_k;
    let registry = session.registry();
    let submissions = session.submissions();

    let query_vector = tfidf_vector(&query.tokens, session.vocabulary(), submissions.len());
    let similarities: Vec<f64> = session
        .vectors()
        .iter()
        .map(|v| cosine_similarity(v, &query_vector))
        .collect();
    let neighbours = top_k(&similarities, k);

    let mut totals = vec![0.0; registry.len()];
    accumulate_expertise(&neighbours, submissions, registry, &mut totals);

    match registry.index_of(contributor) {
        Some(from) => {
            for (total, relation) in totals.iter_mut().zip(session.relations().row(from)) {
                *total += relation;
            }
        }
        None => debug!(contributor, "Contributor unknown to training corpus"),
    }

    let ranked = top_k(&totals, k)
        .into_iter()
        .rev()
        .map(|(score, index)| Recommendation {
            author: registry.name(index).to_string(),
            index,
            score,
        })
        .collect();
    Ok(ranked)
}

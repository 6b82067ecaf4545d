// TF-IDF scoring against a fixed vocabulary.
//
// Component for a stem present in the vocabulary:
//
//   ln(1 + term_count / total_tokens) * ln(corpus_size / doc_count)
//
// `corpus_size` is always the number of training submissions, also when
// scoring queries, so training and query vectors share one IDF scale.
// Stems the vocabulary has never seen are skipped.

use std::collections::HashMap;

use super::vocabulary::Vocabulary;

/// TF-IDF vector for one token list. Pure function of its inputs.
pub fn tfidf_vector(tokens: &[String], vocab: &Vocabulary, corpus_size: usize) -> Vec<f64> {
    let mut vector = vec![0.0; vocab.len()];
    if tokens.is_empty() {
        return vector;
    }

    let mut term_counts: HashMap<&str, usize> = HashMap::new();
    for stem in tokens {
        *term_counts.entry(stem.as_str()).or_insert(0) += 1;
    }

    let total = tokens.len() as f64;
    let corpus = corpus_size as f64;
    for (stem, count) in term_counts {
        let Some(i) = vocab.index_of(stem) else {
            continue;
        };
        let tf = (1.0 + count as f64 / total).ln();
        let idf = (corpus / vocab.doc_count(i) as f64).ln();
        vector[i] = tf * idf;
    }
    vector
}

/// TF-IDF vectors for a batch of token lists, in input order.
pub fn tfidf<'a, I>(documents: I, vocab: &Vocabulary, corpus_size: usize) -> Vec<Vec<f64>>
where
    I: IntoIterator<Item = &'a [String]>,
{
    documents
        .into_iter()
        .map(|tokens| tfidf_vector(tokens, vocab, corpus_size))
        .collect()
}

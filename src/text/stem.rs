// Stemming normalizer: the default text pipeline.
//
// A token survives only if it is ASCII-alphabetic, longer than one
// character, and none of its raw, lowercased or stemmed forms is a stop
// word. Survivors are stored as their stem.

use std::collections::HashSet;

use regex_lite::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use stop_words::{get, LANGUAGE};

use super::traits::Normalizer;

/// Whitespace-separated words. Only sentence punctuation around a word is
/// stripped, so `file.rs` or `i18n` stay whole and are rejected later.
const TOKEN_PATTERN: &str = r"\S+";

const EDGE_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\'',
];

/// Words that carry no signal in review threads, on top of the general
/// English list.
const REVIEW_STOP_WORDS: &[&str] = &[
    "add", "delete", "note", "thank", "another", "please", "per", "test", "implement",
    "complete", "hello", "fix", "say", "said", "would", "one", "back", "could", "thought",
    "think", "see", "seem", "want", "like", "still", "go", "went", "around", "make", "made",
    "come", "came", "hi", "much", "wa", "well", "though", "only", "onli", "might", "away",
    "even", "know", "many", "good", "get", "got", "right", "must", "great", "us",
    "something", "yet", "app", "use", "really", "day", "put", "set", "ok",
];

pub struct StemmingNormalizer {
    stemmer: Stemmer,
    stop_words: HashSet<String>,
    token_pattern: Regex,
}

impl Default for StemmingNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl StemmingNormalizer {
    pub fn new() -> Self {
        let mut stop_words: HashSet<String> = get(LANGUAGE::English).into_iter().collect();
        stop_words.extend(REVIEW_STOP_WORDS.iter().map(|w| w.to_string()));

        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stop_words,
            token_pattern: Regex::new(TOKEN_PATTERN).unwrap(),
        }
    }

    /// Whether a word is in the stop-word set (exact match, no case folding).
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    fn retain(&self, token: &str, out: &mut Vec<String>) {
        if token.len() <= 1 || !token.chars().all(|c| c.is_ascii_alphabetic()) {
            return;
        }
        let lower = token.to_ascii_lowercase();
        let stem = self.stemmer.stem(&lower);
        if self.is_stop_word(token) || self.is_stop_word(&lower) || self.is_stop_word(&stem) {
            return;
        }
        out.push(stem.into_owned());
    }
}

impl Normalizer for StemmingNormalizer {
    fn normalize(&self, title: &str, body: &str) -> Vec<String> {
        let mut stems = Vec::new();
        for text in [title, body] {
            for token in self.token_pattern.find_iter(text) {
                let word = token.as_str().trim_matches(EDGE_PUNCTUATION);
                self.retain(word, &mut stems);
            }
        }
        stems
    }
}

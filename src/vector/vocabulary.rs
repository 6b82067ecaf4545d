// Vocabulary: the dimensions of the vector space.
//
// Stems are kept in discovery order next to a document count: the number
// of training submissions that contain the stem at least once.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Vocabulary {
    stems: Vec<String>,
    doc_counts: Vec<u32>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from the token lists of a training corpus.
    pub fn build<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        let mut vocab = Self::new();
        for tokens in documents {
            vocab.add_document(tokens);
        }
        vocab
    }

    /// Count one document. Each distinct stem bumps its document count once,
    /// however often it repeats inside the document.
    pub fn add_document(&mut self, tokens: &[String]) {
        let mut seen: HashSet<&str> = HashSet::new();
        for stem in tokens {
            if !seen.insert(stem.as_str()) {
                continue;
            }
            match self.index.get(stem) {
                Some(&i) => self.doc_counts[i] += 1,
                None => {
                    self.index.insert(stem.clone(), self.stems.len());
                    self.stems.push(stem.clone());
                    self.doc_counts.push(1);
                }
            }
        }
    }

    pub fn index_of(&self, stem: &str) -> Option<usize> {
        self.index.get(stem).copied()
    }

    pub fn doc_count(&self, index: usize) -> u32 {
        self.doc_counts[index]
    }

    pub fn stems(&self) -> &[String] {
        &self.stems
    }

    pub fn doc_counts(&self) -> &[u32] {
        &self.doc_counts
    }

    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }

    pub fn clear(&mut self) {
        self.stems.clear();
        self.doc_counts.clear();
        self.index.clear();
    }
}

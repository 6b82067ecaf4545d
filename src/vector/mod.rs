// Vector space model: vocabulary, TF-IDF vectors and cosine similarity.

pub mod similarity;
pub mod tfidf;
pub mod vocabulary;

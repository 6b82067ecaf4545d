// Normalizer trait: the seam between raw submission text and the vector space.
//
// Training and query text must go through the same normalizer, otherwise
// query stems never line up with the training vocabulary.

/// Turns a submission's title and body into the ordered list of retained stems.
pub trait Normalizer {
    fn normalize(&self, title: &str, body: &str) -> Vec<String>;
}

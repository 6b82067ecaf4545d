// Reviewrank: reviewer recommendation for pull requests.
//
// This is the library root. Each module corresponds to one stage of the
// pipeline: corpus ingestion, text normalization, the vector space, the
// author registry and collaboration network, and scoring.

pub mod authors;
pub mod config;
pub mod corpus;
pub mod error;
pub mod evaluation;
pub mod output;
pub mod relations;
pub mod scoring;
pub mod session;
pub mod text;
pub mod vector;

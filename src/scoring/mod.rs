// Scoring: ranking candidate reviewers for an incoming submission.

pub mod engine;
pub mod params;

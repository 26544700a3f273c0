//! Transcript comparison.

pub mod transcript;

pub use transcript::{compare_transcripts, tokenize, ComparisonResult};

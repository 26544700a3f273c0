//! Structured extraction from deed scans.
//!
//! The analyzer prepares the image, sends it with the step-by-step prompt, and
//! hands the free-text reply to the two-stage parser.

mod analyzer;
mod parser;
mod prompt;

pub use analyzer::{encode_grayscale_png, DeedAnalyzer};
pub use parser::parse_response;
pub use prompt::{build_prompt, SYSTEM_PROMPT};

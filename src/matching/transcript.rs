//! Bag-of-words comparison of two transcripts of the same document.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Overlap between two transcripts.
///
/// The match count is symmetric; the percentage is relative to the first
/// transcript's token count only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub matching_count: usize,
    pub matching_percentage: f64,
    /// Words of the first transcript that never occur in the second.
    pub non_matching_first: BTreeSet<String>,
    /// Words of the second transcript that never occur in the first.
    pub non_matching_second: BTreeSet<String>,
}

/// Lowercase and split on whitespace runs. Punctuation stays attached.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

fn counts(tokens: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

fn difference(left: &HashMap<&str, usize>, right: &HashMap<&str, usize>) -> BTreeSet<String> {
    left.keys()
        .filter(|word| !right.contains_key(*word))
        .map(|word| word.to_string())
        .collect()
}

/// Compare two transcripts word by word.
pub fn compare_transcripts(first: &str, second: &str) -> ComparisonResult {
    let first_tokens = tokenize(first);
    let second_tokens = tokenize(second);
    let first_counts = counts(&first_tokens);
    let second_counts = counts(&second_tokens);

    // Multiset intersection: a word seen twice on both sides counts twice
    let matching_count: usize = first_counts
        .iter()
        .filter_map(|(word, n)| second_counts.get(word).map(|m| (*n).min(*m)))
        .sum();

    let matching_percentage = if first_tokens.is_empty() {
        0.0
    } else {
        matching_count as f64 / first_tokens.len() as f64 * 100.0
    };

    ComparisonResult {
        matching_count,
        matching_percentage,
        non_matching_first: difference(&first_counts, &second_counts),
        non_matching_second: difference(&second_counts, &first_counts),
    }
}

fn format_set(words: &BTreeSet<String>) -> String {
    let quoted: Vec<String> = words.iter().map(|w| format!("'{}'", w)).collect();
    format!("{{{}}}", quoted.join(", "))
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of matching words: {}", self.matching_count)?;
        writeln!(f, "Percentage of matching words: {:.2}%", self.matching_percentage)?;
        writeln!(
            f,
            "Non-matching words in first transcript: {}",
            format_set(&self.non_matching_first)
        )?;
        write!(
            f,
            "Non-matching words in second transcript: {}",
            format_set(&self.non_matching_second)
        )
    }
}

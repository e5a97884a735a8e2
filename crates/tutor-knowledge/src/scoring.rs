//! Keyword relevance scoring.
//!
//! A chunk's score is the sum of:
//! - `exact_content` if its content contains the whole query,
//! - `exact_source` if its source label contains the whole query,
//! - per query token, `token_occurrence` times the number of whole-word
//!   occurrences in the content plus `token_source` if the token appears
//!   anywhere in the source label.
//!
//! All comparisons run on lowercased text. Tokens are whitespace-separated
//! query pieces with at least `min_token_chars` characters.

use serde::Deserialize;

/// Tunable scoring constants. Only their relative order is load-bearing:
/// whole-query content match > whole-query source match > token hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub exact_content: u64,
    pub exact_source: u64,
    pub token_occurrence: u64,
    pub token_source: u64,
    pub min_token_chars: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact_content: 100,
            exact_source: 50,
            token_occurrence: 10,
            token_source: 5,
            min_token_chars: 3,
        }
    }
}

/// Lowercased, edge-trimmed query with its surviving tokens.
#[derive(Debug, Clone)]
pub(crate) struct Query {
    pub(crate) phrase: String,
    pub(crate) tokens: Vec<String>,
}

impl Query {
    pub(crate) fn parse(raw: &str, min_token_chars: usize) -> Self {
        let phrase = raw.trim().to_lowercase();
        let tokens = phrase
            .split_whitespace()
            .filter(|t| t.chars().count() >= min_token_chars)
            .map(str::to_owned)
            .collect();
        Self { phrase, tokens }
    }
}

/// Score one chunk given its pre-lowercased content and source.
pub(crate) fn score(
    query: &Query,
    content_lower: &str,
    source_lower: &str,
    weights: &ScoringWeights,
) -> u64 {
    let mut score = 0;

    if !query.phrase.is_empty() {
        if content_lower.contains(&query.phrase) {
            score += weights.exact_content;
        }
        if source_lower.contains(&query.phrase) {
            score += weights.exact_source;
        }
    }

    for token in &query.tokens {
        score += weights.token_occurrence * count_whole_word(content_lower, token) as u64;
        if source_lower.contains(token.as_str()) {
            score += weights.token_source;
        }
    }

    score
}

/// Count non-overlapping occurrences of `word` in `text` that sit on word
/// boundaries. A boundary is a string edge or any character that is neither
/// alphanumeric nor `_`, so `model` matches in `model's` and `the-model`
/// but not in `models`.
#[must_use]
pub fn count_whole_word(text: &str, word: &str) -> usize {
    if word.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut from = 0;
    while let Some(offset) = text[from..].find(word) {
        let start = from + offset;
        let end = start + word.len();
        if is_boundary(text[..start].chars().next_back())
            && is_boundary(text[end..].chars().next())
        {
            count += 1;
            from = end;
        } else {
            // Advance one character so overlapping candidates are still tried.
            from = start + text[start..].chars().next().map_or(1, char::len_utf8);
        }
    }
    count
}

fn is_boundary(c: Option<char>) -> bool {
    c.is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
}

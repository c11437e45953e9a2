//! Text normalization for indexing and matching.
//!
//! Lower-cases input, maps everything outside `[a-z0-9]` and whitespace to a
//! space, splits on whitespace, and drops short tokens and stop words. The
//! stop-word list is fixed: changing it changes every score.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Tokens shorter than this are dropped.
pub const MIN_TOKEN_LEN: usize = 3;

/// Joins the two halves of a bigram key.
pub const BIGRAM_SEPARATOR: char = '_';

/// Common English function words excluded from indexing and matching.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "of", "in", "on", "at", "to", "for", "by",
    "with", "from", "as", "is", "are", "was", "were", "be", "been", "being", "it", "its",
    "this", "that", "these", "those", "has", "have", "had", "not", "all", "any", "can",
    "could", "will", "would", "shall", "should", "may", "might", "must", "into", "onto",
    "than", "then", "there", "their", "them", "they", "which", "who", "whom", "what", "when",
    "where", "while", "how", "our", "out", "over", "under", "upon", "about", "after",
    "before", "between", "through", "during", "each", "other", "some", "such", "only", "own",
    "same", "also", "very", "more", "most", "both", "your", "you", "her", "his", "him",
    "she", "here", "off", "once", "again", "does", "did", "just", "too", "few", "per", "via",
    "etc",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// Whether `token` is in the fixed stop-word list.
#[must_use]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(token)
}

/// Split text into normalized tokens, preserving order.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|token| token.len() >= MIN_TOKEN_LEN && !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Adjacent token pairs joined with `_`. Empty for fewer than two tokens.
#[must_use]
pub fn bigrams(tokens: &[String]) -> Vec<String> {
    tokens
        .windows(2)
        .map(|pair| format!("{}{BIGRAM_SEPARATOR}{}", pair[0], pair[1]))
        .collect()
}

/// Whether an index key is a bigram rather than a single word.
#[must_use]
pub fn is_bigram(key: &str) -> bool {
    key.contains(BIGRAM_SEPARATOR)
}

fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

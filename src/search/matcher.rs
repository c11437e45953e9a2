//! Query-time scoring and ranking against a [`TaxonomyIndex`].
//!
//! A query accumulates a composite score per occupation:
//!
//! - **Unigrams**: `ln(total / df)` for every query token found in the index,
//!   added to each code in the token's posting list. Repeated query tokens
//!   contribute once per occurrence.
//! - **Bigrams**: the same weight, doubled.
//! - **Title bonus**: for every entry, the fraction of its title tokens found
//!   as substrings of the lower-cased query text, times ten.
//!
//! Codes enter the scoreboard in the order they are first touched, and that
//! order breaks ties after rounding.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::index::TaxonomyIndex;
use super::tokenizer::{bigrams, tokenize};
use crate::taxonomy::{OccupationEntry, QueryRecord};

/// Result count used when the caller does not pick one.
pub const DEFAULT_TOP_N: usize = 10;

/// Multiplier applied to bigram weights.
pub const BIGRAM_WEIGHT: f64 = 2.0;

/// Score added for a title whose tokens all occur in the query.
pub const TITLE_BONUS_SCALE: f64 = 10.0;

/// Where a match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Local,
    Ai,
}

/// An occupation entry paired with its score or external provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatch {
    #[serde(flatten)]
    pub entry: OccupationEntry,
    /// Composite score rounded to two decimals. Absent on external matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
    pub source: MatchSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Whether an external code exists in the local taxonomy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl ScoredMatch {
    /// A locally scored match.
    #[must_use]
    pub fn local(entry: OccupationEntry, relevance_score: f64) -> Self {
        Self {
            entry,
            relevance_score: Some(relevance_score),
            source: MatchSource::Local,
            reason: None,
            verified: None,
        }
    }

    /// A match supplied by an external ranker.
    #[must_use]
    pub fn external(entry: OccupationEntry, reason: String, verified: bool) -> Self {
        Self {
            entry,
            relevance_score: None,
            source: MatchSource::Ai,
            reason: Some(reason),
            verified: Some(verified),
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.entry.code
    }

    /// Score used for ordering; external matches sort as zero.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.relevance_score.unwrap_or(0.0)
    }
}

/// Per-code accumulator that remembers first-insertion order.
#[derive(Debug, Default)]
struct Scoreboard {
    scores: Vec<(usize, f64)>,
    lookup: HashMap<usize, usize>,
}

impl Scoreboard {
    fn add(&mut self, slot: usize, weight: f64) {
        match self.lookup.get(&slot) {
            Some(&i) => self.scores[i].1 += weight,
            None => {
                self.lookup.insert(slot, self.scores.len());
                self.scores.push((slot, weight));
            }
        }
    }

    fn into_ranked(self, top_n: usize) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self
            .scores
            .into_iter()
            .map(|(slot, score)| (slot, round_score(score)))
            .filter(|(_, score)| *score > 0.0)
            .collect();
        // sort_by is stable, so equal scores keep insertion order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(top_n);
        ranked
    }
}

/// Round to two decimal places.
#[must_use]
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Rank taxonomy entries against a query record.
///
/// Returns at most `top_n` matches with strictly positive scores, best
/// first. `top_n == 0` yields an empty list.
#[must_use]
pub fn match_query(index: &TaxonomyIndex, query: &QueryRecord, top_n: usize) -> Vec<ScoredMatch> {
    match_text(index, &query.query_text(), top_n)
}

/// Rank taxonomy entries against already assembled query text.
#[must_use]
pub fn match_text(index: &TaxonomyIndex, text: &str, top_n: usize) -> Vec<ScoredMatch> {
    if top_n == 0 {
        return Vec::new();
    }

    let board = score_text(index, text);
    let candidates = board.scores.len();
    let ranked = board.into_ranked(top_n);

    debug!(
        query = text,
        candidates,
        returned = ranked.len(),
        "Scored query"
    );

    ranked
        .into_iter()
        .map(|(slot, score)| ScoredMatch::local(index.entry_at(slot).clone(), score))
        .collect()
}

fn score_text(index: &TaxonomyIndex, text: &str) -> Scoreboard {
    let mut board = Scoreboard::default();
    if index.is_empty() {
        return board;
    }

    #[allow(clippy::cast_precision_loss)]
    let total = index.len() as f64;
    let tokens = tokenize(text);
    let pairs = bigrams(&tokens);

    let weighted = tokens
        .iter()
        .map(|token| (token, 1.0))
        .chain(pairs.iter().map(|pair| (pair, BIGRAM_WEIGHT)));
    for (key, multiplier) in weighted {
        let Some(slots) = index.slots_for(key) else {
            continue;
        };
        #[allow(clippy::cast_precision_loss)]
        let weight = (total / slots.len() as f64).ln() * multiplier;
        for &slot in slots {
            board.add(slot, weight);
        }
    }

    let lowered = text.to_lowercase();
    for (slot, title_tokens) in index.title_tokens() {
        if title_tokens.is_empty() {
            continue;
        }
        let hits = title_tokens
            .iter()
            .filter(|token| lowered.contains(token.as_str()))
            .count();
        if hits > 0 {
            #[allow(clippy::cast_precision_loss)]
            let ratio = hits as f64 / title_tokens.len() as f64;
            board.add(slot, ratio * TITLE_BONUS_SCALE);
        }
    }

    board
}

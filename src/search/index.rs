//! Inverted index over the occupation taxonomy.
//!
//! Built once from the entry list and read-only afterwards, so a single
//! `TaxonomyIndex` can be shared by any number of concurrent matches.
//!
//! ## Layout
//!
//! ```text
//! entries:   [e0, e1, e2, ...]            canonical records, insertion order
//! positions: code -> slot in `entries`
//! postings:  token | bigram -> [slot, ...] (first-seen order, no duplicates)
//! ```
//!
//! Duplicate codes follow a last-write-wins policy: the later entry replaces
//! the earlier one in its original slot, and keys produced by both entries
//! point at that slot.

use std::collections::HashMap;

use tracing::{debug, info};

use super::tokenizer::{bigrams, is_bigram, tokenize};
use crate::error::{OmError, Result};
use crate::taxonomy::OccupationEntry;

/// Inverted index from normalized tokens and bigrams to occupation codes.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyIndex {
    entries: Vec<OccupationEntry>,
    positions: HashMap<String, usize>,
    postings: HashMap<String, Vec<usize>>,
    /// Tokenized titles, one per entry slot.
    title_tokens: Vec<Vec<String>>,
}

impl TaxonomyIndex {
    /// Build the index in a single pass over `entries`.
    ///
    /// Fails on the first entry with a blank code; a partial index is never
    /// returned.
    pub fn build(entries: impl IntoIterator<Item = OccupationEntry>) -> Result<Self> {
        let mut index = Self::default();
        let mut duplicates = 0usize;

        for (input_index, entry) in entries.into_iter().enumerate() {
            if entry.code.trim().is_empty() {
                return Err(OmError::InvalidEntry {
                    index: input_index,
                    reason: "missing code".to_string(),
                });
            }

            let tokens = tokenize(&entry.indexed_text());
            let keys = bigrams(&tokens);
            let title_tokens = tokenize(&entry.title);

            let (slot, replaced) = match index.positions.get(&entry.code) {
                Some(&slot) => {
                    debug!(code = %entry.code, "Duplicate occupation code, later entry wins");
                    duplicates += 1;
                    index.entries[slot] = entry;
                    index.title_tokens[slot] = title_tokens;
                    (slot, true)
                }
                None => {
                    let slot = index.entries.len();
                    index.positions.insert(entry.code.clone(), slot);
                    index.entries.push(entry);
                    index.title_tokens.push(title_tokens);
                    (slot, false)
                }
            };

            for key in tokens.into_iter().chain(keys) {
                let slots = index.postings.entry(key).or_default();
                // Within one entry a repeated key lands right after itself;
                // a replaced slot may already be anywhere in the list.
                if slots.last() == Some(&slot) || (replaced && slots.contains(&slot)) {
                    continue;
                }
                slots.push(slot);
            }
        }

        info!(
            entries = index.entries.len(),
            keys = index.postings.len(),
            duplicates,
            "Built taxonomy index"
        );
        Ok(index)
    }

    /// Number of distinct occupation codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in first-seen order.
    #[must_use]
    pub fn entries(&self) -> &[OccupationEntry] {
        &self.entries
    }

    /// Look up an entry by its code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&OccupationEntry> {
        self.positions.get(code).map(|&slot| &self.entries[slot])
    }

    /// Number of entries whose text contains `key`.
    #[must_use]
    pub fn document_frequency(&self, key: &str) -> usize {
        self.postings.get(key).map_or(0, Vec::len)
    }

    /// Codes mapped to `key`, in first-seen order.
    pub fn codes_for<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.postings
            .get(key)
            .into_iter()
            .flatten()
            .map(|&slot| self.entries[slot].code.as_str())
    }

    /// Total number of keys (unigrams and bigrams).
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.postings.len()
    }

    #[must_use]
    pub fn unigram_count(&self) -> usize {
        self.postings.keys().filter(|key| !is_bigram(key)).count()
    }

    #[must_use]
    pub fn bigram_count(&self) -> usize {
        self.postings.keys().filter(|key| is_bigram(key)).count()
    }

    /// Keys with the highest document frequency, ties broken alphabetically.
    #[must_use]
    pub fn top_keys(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut keys: Vec<(&str, usize)> = self
            .postings
            .iter()
            .map(|(key, slots)| (key.as_str(), slots.len()))
            .collect();
        keys.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        keys.truncate(limit);
        keys
    }

    pub(crate) fn slots_for(&self, key: &str) -> Option<&[usize]> {
        self.postings.get(key).map(Vec::as_slice)
    }

    pub(crate) fn entry_at(&self, slot: usize) -> &OccupationEntry {
        &self.entries[slot]
    }

    pub(crate) fn title_tokens(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.title_tokens
            .iter()
            .enumerate()
            .map(|(slot, tokens)| (slot, tokens.as_slice()))
    }
}

/// Build an index from a taxonomy entry list.
pub fn build_index(entries: Vec<OccupationEntry>) -> Result<TaxonomyIndex> {
    debug!(entries = entries.len(), "Building taxonomy index");
    TaxonomyIndex::build(entries)
}

use std::collections::HashSet;

use proptest::prelude::*;

use occmatch::search::{TaxonomyIndex, match_text};
use occmatch::taxonomy::OccupationEntry;

const WORDS: &[&str] = &[
    "software", "developers", "registered", "nurses", "data", "scientists", "computer",
    "mathematical", "healthcare", "engineers", "mechanical", "teachers", "elementary",
    "accountants", "auditors", "business", "financial", "science", "technical", "practitioners",
];

fn arb_phrase(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..=max_words).prop_map(|w| w.join(" "))
}

fn arb_entries() -> impl Strategy<Value = Vec<OccupationEntry>> {
    prop::collection::vec(
        ("[0-9]{2}-[0-9]{4}", arb_phrase(3), arb_phrase(3)),
        1..25,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(code, title, major)| OccupationEntry::new(code, title).with_major_group(major))
            .collect()
    })
}

/// Each entry followed later by a copy under another code, so every pair scores identically.
fn arb_twinned_entries() -> impl Strategy<Value = (usize, Vec<OccupationEntry>)> {
    prop::collection::vec((arb_phrase(3), arb_phrase(3)), 1..15).prop_map(|rows| {
        let entries = ["B", "T"]
            .iter()
            .flat_map(|prefix| {
                rows.iter().enumerate().map(move |(i, (title, major))| {
                    OccupationEntry::new(format!("{prefix}{i}"), title.as_str())
                        .with_major_group(major.as_str())
                })
            })
            .collect();
        (rows.len(), entries)
    })
}

proptest! {
    #[test]
    fn matches_only_return_known_codes(entries in arb_entries(), query in arb_phrase(6)) {
        let codes: HashSet<String> = entries.iter().map(|e| e.code.clone()).collect();
        let index = TaxonomyIndex::build(entries).unwrap();

        for m in match_text(&index, &query, 50) {
            prop_assert!(codes.contains(m.code()), "fabricated code {}", m.code());
        }
    }

    #[test]
    fn matches_are_sorted_by_score(entries in arb_entries(), query in arb_phrase(6)) {
        let index = TaxonomyIndex::build(entries).unwrap();
        let matches = match_text(&index, &query, 50);

        for pair in matches.windows(2) {
            prop_assert!(pair[0].score() >= pair[1].score());
        }
    }

    #[test]
    fn result_length_is_bounded(entries in arb_entries(), query in arb_phrase(6), top_n in 0usize..8) {
        let index = TaxonomyIndex::build(entries).unwrap();
        let matches = match_text(&index, &query, top_n);

        prop_assert!(matches.len() <= top_n);
        if top_n == 0 {
            prop_assert!(matches.is_empty());
        }
    }

    #[test]
    fn every_returned_score_is_positive(entries in arb_entries(), query in arb_phrase(6)) {
        let index = TaxonomyIndex::build(entries).unwrap();
        for m in match_text(&index, &query, 50) {
            prop_assert!(m.relevance_score.is_some());
            prop_assert!(m.score() > 0.0);
        }
    }

    #[test]
    fn matching_is_idempotent(entries in arb_entries(), query in arb_phrase(6)) {
        let index = TaxonomyIndex::build(entries).unwrap();
        prop_assert_eq!(match_text(&index, &query, 10), match_text(&index, &query, 10));
    }

    #[test]
    fn index_codes_exist_in_entries(entries in arb_entries()) {
        let index = TaxonomyIndex::build(entries).unwrap();
        for (key, _) in index.top_keys(usize::MAX) {
            for code in index.codes_for(key) {
                prop_assert!(index.get(code).is_some());
            }
        }
    }

    #[test]
    fn equal_scores_keep_first_touched_order(
        (count, entries) in arb_twinned_entries(),
        query in arb_phrase(6),
    ) {
        let index = TaxonomyIndex::build(entries).unwrap();
        let matches = match_text(&index, &query, 1000);
        let position = |code: &str| matches.iter().position(|m| m.code() == code);

        for i in 0..count {
            let original = position(&format!("B{i}"));
            let twin = position(&format!("T{i}"));
            prop_assert_eq!(original.is_some(), twin.is_some());
            if let (Some(a), Some(b)) = (original, twin) {
                prop_assert!(a < b, "B{} at {} after its twin at {}", i, a, b);
                prop_assert_eq!(matches[a].relevance_score, matches[b].relevance_score);
            }
        }
    }
}

//! End-to-end matching scenarios over small taxonomies.
//!
//! Tests cover:
//! - Token overlap ranking
//! - Exact title bonus
//! - Duplicate code handling
//! - Degenerate queries

use occmatch::search::{Matcher, TaxonomyIndex, build_index, match_query};
use occmatch::taxonomy::{OccupationEntry, QueryRecord};
use occmatch::test_utils::fixtures::sample_entries;

fn two_entry_taxonomy() -> Vec<OccupationEntry> {
    vec![
        OccupationEntry::new("15-1252", "Software Developers")
            .with_major_group("Computer and Mathematical"),
        OccupationEntry::new("29-1141", "Registered Nurses").with_major_group("Healthcare"),
    ]
}

fn position(matches: &[occmatch::search::ScoredMatch], code: &str) -> Option<usize> {
    matches.iter().position(|m| m.code() == code)
}

// ============================================================================
// Ranking scenarios
// ============================================================================

#[test]
fn computer_science_ranks_software_developers_above_nurses() {
    let index = build_index(two_entry_taxonomy()).unwrap();
    let query = QueryRecord::new().name("Computer Science").program_type("Bachelor");
    let matches = match_query(&index, &query, 10);

    let developers = position(&matches, "15-1252").expect("software developers matched");
    if let Some(nurses) = position(&matches, "29-1141") {
        assert!(developers < nurses);
    }
}

#[test]
fn exact_title_query_gets_full_bonus_and_ranks_first() {
    let index = build_index(sample_entries()).unwrap();
    let matches = match_query(&index, &QueryRecord::new().name("Registered Nurses"), 10);

    assert_eq!(matches[0].code(), "29-1141");
    let score = matches[0].score();
    assert!(score >= 10.0, "title bonus missing: {score}");
}

#[test]
fn long_name_and_context_fields_contribute() {
    let index = build_index(sample_entries()).unwrap();
    let query = QueryRecord::new()
        .long_name("Bachelor of Science in Mechanical Engineering")
        .college("College of Engineering")
        .level("Undergraduate");
    let matches = match_query(&index, &query, 3);

    assert_eq!(matches[0].code(), "17-2141");
}

#[test]
fn nursing_query_prefers_nursing_occupations() {
    let index = build_index(sample_entries()).unwrap();
    let query = QueryRecord::new()
        .name("Nursing")
        .degree_designation("BSN")
        .college("Health Sciences");
    let matches = match_query(&index, &query, 5);
    let codes: Vec<&str> = matches.iter().map(|m| m.code()).collect();

    assert!(codes.contains(&"29-1141") || codes.contains(&"29-1171"), "{codes:?}");
    assert!(!codes.contains(&"13-2011"));
}

#[test]
fn results_never_exceed_top_n() {
    let index = build_index(sample_entries()).unwrap();
    let query = QueryRecord::new().name("Computer Science Health Engineering Business");

    for top_n in 0..6 {
        assert!(match_query(&index, &query, top_n).len() <= top_n);
    }
    assert!(match_query(&index, &query, 0).is_empty());
}

// ============================================================================
// Degenerate inputs
// ============================================================================

#[test]
fn empty_query_is_not_an_error() {
    let index = build_index(sample_entries()).unwrap();
    assert!(match_query(&index, &QueryRecord::new(), 10).is_empty());
}

#[test]
fn cip_code_alone_does_not_score() {
    let index = build_index(sample_entries()).unwrap();
    let query = QueryRecord::new().cip("51.3801");
    assert!(match_query(&index, &query, 10).is_empty());
}

#[test]
fn stop_word_only_query_matches_nothing() {
    let index = build_index(sample_entries()).unwrap();
    let query = QueryRecord::new().name("of the and for");
    assert!(match_query(&index, &query, 10).is_empty());
}

// ============================================================================
// Duplicate codes
// ============================================================================

#[test]
fn duplicate_code_keeps_later_entry() {
    let mut entries = two_entry_taxonomy();
    entries.push(OccupationEntry::new("29-1141", "Nurses, Registered").with_major_group("Health"));
    let index = TaxonomyIndex::build(entries).unwrap();

    assert_eq!(index.len(), 2);
    let matches = match_query(&index, &QueryRecord::new().name("Registered Nurses"), 10);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].entry.title, "Nurses, Registered");
    assert_eq!(matches[0].entry.major_group, "Health");
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn shared_matcher_gives_identical_results_across_threads() {
    let matcher = Matcher::new(build_index(sample_entries()).unwrap());
    let query = QueryRecord::new().name("Data Science");
    let expected = matcher.find_matches(&query, 5);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let matcher = matcher.clone();
            let query = query.clone();
            std::thread::spawn(move || matcher.find_matches(&query, 5))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

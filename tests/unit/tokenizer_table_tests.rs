//! Table-driven tokenizer and scoring checks.

use occmatch::search::{bigrams, build_index, match_text, round_score, tokenize};
use occmatch::taxonomy::OccupationEntry;
use occmatch::test_utils::{TestCase, run_table_tests};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn tokenize_table() {
    let cases = vec![
        TestCase {
            name: "lowercases and splits on punctuation",
            input: "Nurses, Registered",
            expected: strings(&["nurses", "registered"]),
        },
        TestCase {
            name: "drops short tokens and stop words",
            input: "Bachelor of Science in IT",
            expected: strings(&["bachelor", "science"]),
        },
        TestCase {
            name: "keeps digits",
            input: "Level 300 coursework",
            expected: strings(&["level", "300", "coursework"]),
        },
        TestCase {
            name: "keeps duplicates in order",
            input: "engineering and engineering",
            expected: strings(&["engineering", "engineering"]),
        },
        TestCase {
            name: "empty input",
            input: "",
            expected: strings(&[]),
        },
    ];

    run_table_tests(cases, tokenize);
}

#[test]
fn bigram_table() {
    let cases = vec![
        TestCase {
            name: "adjacent pairs",
            input: "software web developers",
            expected: strings(&["software_web", "web_developers"]),
        },
        TestCase {
            name: "stop words removed before pairing",
            input: "architecture and engineering",
            expected: strings(&["architecture_engineering"]),
        },
        TestCase {
            name: "single token has none",
            input: "nurses",
            expected: strings(&[]),
        },
    ];

    run_table_tests(cases, |input| bigrams(&tokenize(input)));
}

#[test]
fn round_score_table() {
    let cases = vec![
        TestCase {
            name: "already two places",
            input: 12.77,
            expected: 12.77,
        },
        TestCase {
            name: "rounds half up",
            input: 1.005_001,
            expected: 1.01,
        },
        TestCase {
            name: "truncates long tails",
            input: 2.772_588_722,
            expected: 2.77,
        },
    ];

    run_table_tests(cases, round_score);
}

#[test]
fn single_entry_index_scores_only_title_bonus() {
    // With one entry every IDF is ln(1) = 0.
    let index = build_index(vec![OccupationEntry::new("29-1141", "Registered Nurses")]).unwrap();

    let cases = vec![
        TestCase {
            name: "full title",
            input: "Registered Nurses",
            expected: vec![10.0],
        },
        TestCase {
            name: "half the query in title",
            input: "Nurses Pottery",
            expected: vec![5.0],
        },
        TestCase {
            name: "nothing in title",
            input: "Pottery",
            expected: vec![],
        },
    ];

    run_table_tests(cases, |input| {
        match_text(&index, input, 10)
            .iter()
            .map(|m| m.score())
            .collect::<Vec<f64>>()
    });
}

use proptest::prelude::*;

use occmatch::search::tokenizer::{MIN_TOKEN_LEN, bigrams, is_stop_word, tokenize};

proptest! {
    #[test]
    fn tokens_are_long_enough_and_not_stop_words(text in ".{0,200}") {
        for token in tokenize(&text) {
            prop_assert!(token.len() >= MIN_TOKEN_LEN, "short token {token:?}");
            prop_assert!(!is_stop_word(&token), "stop word {token:?}");
        }
    }

    #[test]
    fn tokens_only_contain_lowercase_ascii_and_digits(text in ".{0,200}") {
        for token in tokenize(&text) {
            prop_assert!(token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn tokenize_is_deterministic(text in ".{0,200}") {
        prop_assert_eq!(tokenize(&text), tokenize(&text));
    }

    #[test]
    fn bigram_count_is_one_less_than_tokens(words in prop::collection::vec("[a-z]{3,10}", 0..12)) {
        let tokens = tokenize(&words.join(" "));
        let pairs = bigrams(&tokens);
        prop_assert_eq!(pairs.len(), tokens.len().saturating_sub(1));
        for (i, pair) in pairs.iter().enumerate() {
            prop_assert_eq!(pair, &format!("{}_{}", tokens[i], tokens[i + 1]));
        }
    }
}

//! Lexical occupation matching.
//!
//! Builds an inverted index over the taxonomy once, then scores queries
//! against it with IDF-style weights, bigram boosting, and a title bonus.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   Vec<OccupationEntry>       │
//! └──────────────────────────────┘
//!                │ build once
//!                ▼
//! ┌──────────────────────────────┐      ┌──────────────────────────────┐
//! │   TaxonomyIndex (index.rs)   │      │   ExternalRanker (optional)  │
//! │   token/bigram -> codes      │      │   (external.rs)              │
//! └──────────────────────────────┘      └──────────────────────────────┘
//!                │ read-only                           │ timeout-bounded
//!                ▼                                     ▼
//! ┌──────────────────────────────┐      ┌──────────────────────────────┐
//! │   match_query (matcher.rs)   │      │   enrich_external            │
//! └──────────────────────────────┘      └──────────────────────────────┘
//!                │                                     │
//!                └──────────────────┬──────────────────┘
//!                                   ▼
//!                 MergedMatches { local, external? }
//! ```

pub mod command_ranker;
pub mod engine;
pub mod external;
pub mod index;
pub mod matcher;
pub mod tokenizer;

pub use command_ranker::{CommandRanker, parse_ranker_response};
pub use engine::Matcher;
pub use external::{
    ExternalCandidate, ExternalRanker, MergedMatches, enrich_external, match_and_merge,
    rank_with_timeout,
};
pub use index::{TaxonomyIndex, build_index};
pub use matcher::{
    BIGRAM_WEIGHT, DEFAULT_TOP_N, MatchSource, ScoredMatch, TITLE_BONUS_SCALE, match_query,
    match_text, round_score,
};
pub use tokenizer::{STOP_WORDS, bigrams, is_stop_word, tokenize};

//! Output formatters for CLI commands
//!
//! Provides structured formatters for match output that can render to
//! multiple formats (Human, JSON, JSONL, Plain, TSV).

mod match_results;

pub use match_results::{BatchItem, BatchResults, MatchResults};

//! Shareable matching service.

use std::sync::Arc;
use std::time::Duration;

use super::external::{ExternalRanker, MergedMatches, match_and_merge};
use super::index::TaxonomyIndex;
use super::matcher::{ScoredMatch, match_query};
use crate::config::DEFAULT_RANKER_TIMEOUT_MS;
use crate::taxonomy::QueryRecord;

/// Owns a shared index and an optional external ranker.
///
/// Cloning is cheap; clones share the same index and ranker.
#[derive(Clone)]
pub struct Matcher {
    index: Arc<TaxonomyIndex>,
    ranker: Option<Arc<dyn ExternalRanker>>,
    timeout: Duration,
}

impl Matcher {
    pub fn new(index: impl Into<Arc<TaxonomyIndex>>) -> Self {
        Self {
            index: index.into(),
            ranker: None,
            timeout: Duration::from_millis(DEFAULT_RANKER_TIMEOUT_MS),
        }
    }

    #[must_use]
    pub fn with_ranker(mut self, ranker: Arc<dyn ExternalRanker>) -> Self {
        self.ranker = Some(ranker);
        self
    }

    /// Upper bound on a single external ranker call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn index(&self) -> &TaxonomyIndex {
        &self.index
    }

    #[must_use]
    pub fn has_ranker(&self) -> bool {
        self.ranker.is_some()
    }

    /// Local matches only.
    #[must_use]
    pub fn find_matches(&self, query: &QueryRecord, top_n: usize) -> Vec<ScoredMatch> {
        match_query(&self.index, query, top_n)
    }

    /// Local matches plus the external ranker's view, if one is attached.
    pub async fn match_and_merge(&self, query: &QueryRecord, top_n: usize) -> MergedMatches {
        match_and_merge(
            &self.index,
            query,
            top_n,
            self.ranker.as_deref(),
            self.timeout,
        )
        .await
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("entries", &self.index.len())
            .field("ranker", &self.ranker.as_ref().map(|r| r.name().to_string()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

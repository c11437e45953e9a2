//! Optional external ranking and merging with local results.
//!
//! An [`ExternalRanker`] proposes `(code, title, reason)` candidates from
//! some out-of-process source. Its output is a side channel: local scoring
//! never sees it, and any failure or timeout collapses to
//! `external_matches: None` instead of an error.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::index::TaxonomyIndex;
use super::matcher::{ScoredMatch, match_query};
use crate::error::{OmError, Result};
use crate::taxonomy::{OccupationEntry, QueryRecord};

/// A candidate proposed by an external ranker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalCandidate {
    #[serde(alias = "soc_code", alias = "socCode")]
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub reason: String,
}

impl ExternalCandidate {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            reason: reason.into(),
        }
    }
}

/// A pluggable secondary ranking source.
#[async_trait]
pub trait ExternalRanker: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Propose up to `top_n` candidates for `query`, best first.
    async fn rank(&self, query: &QueryRecord, top_n: usize) -> Result<Vec<ExternalCandidate>>;
}

/// Local matches plus the optional external side channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedMatches {
    pub local_matches: Vec<ScoredMatch>,
    /// `None` when no ranker is configured or the ranker failed.
    pub external_matches: Option<Vec<ScoredMatch>>,
}

/// Resolve external candidates against the local taxonomy.
///
/// Known codes take the local title and group labels and are marked
/// verified; unknown codes keep the external title.
#[must_use]
pub fn enrich_external(
    index: &TaxonomyIndex,
    candidates: Vec<ExternalCandidate>,
) -> Vec<ScoredMatch> {
    candidates
        .into_iter()
        .map(|candidate| match index.get(&candidate.code) {
            Some(entry) => ScoredMatch::external(entry.clone(), candidate.reason, true),
            None => ScoredMatch::external(
                OccupationEntry::new(candidate.code, candidate.title),
                candidate.reason,
                false,
            ),
        })
        .collect()
}

/// Run local matching and, if a ranker is given, the external ranker under
/// `timeout`.
///
/// Never fails: ranker errors and timeouts are logged and reported as
/// `external_matches: None`.
pub async fn match_and_merge(
    index: &TaxonomyIndex,
    query: &QueryRecord,
    top_n: usize,
    ranker: Option<&dyn ExternalRanker>,
    timeout: Duration,
) -> MergedMatches {
    let local_matches = match_query(index, query, top_n);

    let external_matches = match ranker {
        Some(ranker) => run_ranker(index, query, top_n, ranker, timeout).await,
        None => None,
    };

    MergedMatches {
        local_matches,
        external_matches,
    }
}

async fn run_ranker(
    index: &TaxonomyIndex,
    query: &QueryRecord,
    top_n: usize,
    ranker: &dyn ExternalRanker,
    timeout: Duration,
) -> Option<Vec<ScoredMatch>> {
    match rank_with_timeout(ranker, query, top_n, timeout).await {
        Ok(candidates) => {
            debug!(
                ranker = ranker.name(),
                candidates = candidates.len(),
                "External ranker succeeded"
            );
            Some(enrich_external(index, candidates))
        }
        Err(err) => {
            warn!(
                ranker = ranker.name(),
                code = %err.code(),
                error = %err,
                "External ranker failed, using local matches only"
            );
            None
        }
    }
}

/// Call `ranker`, turning an elapsed `timeout` into [`OmError::Timeout`].
pub async fn rank_with_timeout(
    ranker: &dyn ExternalRanker,
    query: &QueryRecord,
    top_n: usize,
    timeout: Duration,
) -> Result<Vec<ExternalCandidate>> {
    tokio::time::timeout(timeout, ranker.rank(query, top_n))
        .await
        .unwrap_or_else(|_| {
            Err(OmError::Timeout(format!(
                "{} did not answer within {}ms",
                ranker.name(),
                timeout.as_millis()
            )))
        })
}

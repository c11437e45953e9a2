//! Local matching merged with an external ranker.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use occmatch::OmError;
use occmatch::search::{
    ExternalCandidate, ExternalRanker, MatchSource, Matcher, build_index, match_query,
};
use occmatch::taxonomy::QueryRecord;
use occmatch::test_utils::fixtures::sample_entries;

enum Behavior {
    Answer(Vec<ExternalCandidate>),
    Fail,
    Hang,
}

struct ScriptedRanker {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl ScriptedRanker {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ExternalRanker for ScriptedRanker {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn rank(&self, _query: &QueryRecord, _top_n: usize) -> occmatch::Result<Vec<ExternalCandidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Answer(candidates) => Ok(candidates.clone()),
            Behavior::Fail => Err(OmError::RankerUnavailable("offline".to_string())),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
        }
    }
}

fn nursing() -> QueryRecord {
    QueryRecord::new().name("Registered Nurses").college("Health Sciences")
}

#[tokio::test]
async fn external_matches_are_verified_against_taxonomy() {
    let ranker = ScriptedRanker::new(Behavior::Answer(vec![
        ExternalCandidate::new("29-1171", "NP", "advanced practice"),
        ExternalCandidate::new("99-9999", "Imaginary Role", "hallucinated"),
    ]));
    let matcher = Matcher::new(build_index(sample_entries()).unwrap()).with_ranker(ranker.clone());

    let merged = matcher.match_and_merge(&nursing(), 5).await;
    let external = merged.external_matches.expect("ranker answered");

    assert_eq!(external.len(), 2);
    assert_eq!(external[0].entry.title, "Nurse Practitioners");
    assert_eq!(external[0].verified, Some(true));
    assert_eq!(external[0].reason.as_deref(), Some("advanced practice"));
    assert_eq!(external[1].entry.title, "Imaginary Role");
    assert_eq!(external[1].verified, Some(false));
    assert!(external.iter().all(|m| m.source == MatchSource::Ai));
    assert!(external.iter().all(|m| m.relevance_score.is_none()));
    assert_eq!(ranker.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn external_answer_does_not_change_local_matches() {
    let index = build_index(sample_entries()).unwrap();
    let expected = match_query(&index, &nursing(), 5);
    let ranker = ScriptedRanker::new(Behavior::Answer(vec![ExternalCandidate::new(
        "13-2011", "", "",
    )]));

    let merged = Matcher::new(index)
        .with_ranker(ranker)
        .match_and_merge(&nursing(), 5)
        .await;

    assert_eq!(merged.local_matches, expected);
}

#[tokio::test]
async fn failing_ranker_falls_back_to_local_only() {
    let matcher = Matcher::new(build_index(sample_entries()).unwrap())
        .with_ranker(ScriptedRanker::new(Behavior::Fail));

    let merged = matcher.match_and_merge(&nursing(), 5).await;

    assert!(!merged.local_matches.is_empty());
    assert_eq!(merged.local_matches[0].code(), "29-1141");
    assert!(merged.external_matches.is_none());
}

#[tokio::test(start_paused = true)]
async fn hanging_ranker_times_out() {
    let matcher = Matcher::new(build_index(sample_entries()).unwrap())
        .with_ranker(ScriptedRanker::new(Behavior::Hang))
        .with_timeout(Duration::from_millis(100));

    let merged = matcher.match_and_merge(&nursing(), 5).await;

    assert!(!merged.local_matches.is_empty());
    assert!(merged.external_matches.is_none());
}

#[tokio::test]
async fn no_ranker_means_no_external_section() {
    let matcher = Matcher::new(build_index(sample_entries()).unwrap());
    let merged = matcher.match_and_merge(&nursing(), 5).await;

    assert!(merged.external_matches.is_none());
    let json = serde_json::to_value(&merged).unwrap();
    assert!(json["externalMatches"].is_null());
    assert_eq!(json["localMatches"][0]["source"], "local");
}

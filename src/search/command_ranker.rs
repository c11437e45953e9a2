//! External ranker backed by a user-configured command.
//!
//! The command receives `{"query": {...}, "topN": n}` on stdin and prints
//! candidates on stdout, either as a JSON array of `{code, title, reason}`
//! objects or as an object with a `matches` array. Output wrapped in a
//! fenced json block, as chat-style tools tend to produce, is accepted.

use std::process::Stdio;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::external::{ExternalCandidate, ExternalRanker};
use crate::config::RankerConfig;
use crate::error::{OmError, Result};
use crate::taxonomy::QueryRecord;

/// Runs an external command to rank a query.
#[derive(Debug, Clone)]
pub struct CommandRanker {
    program: String,
    args: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RankRequest<'a> {
    query: &'a QueryRecord,
    top_n: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RankResponse {
    List(Vec<ExternalCandidate>),
    Wrapped { matches: Vec<ExternalCandidate> },
}

impl CommandRanker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from `[ranker]` settings. The command is required.
    pub fn from_config(config: &RankerConfig) -> Result<Self> {
        let program = config
            .command
            .as_deref()
            .map(str::trim)
            .filter(|command| !command.is_empty())
            .ok_or_else(|| OmError::MissingConfig("ranker.command".to_string()))?;
        Ok(Self::new(program, config.args.clone()))
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, input: Vec<u8>) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                OmError::RankerUnavailable(format!("failed to start {}: {e}", self.program))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&input).await {
                Ok(()) => {}
                // The command may exit without reading its input.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(e) => return Err(e.into()),
            }
        }

        let output = child.wait_with_output().await.map_err(|e| {
            OmError::RankerUnavailable(format!("failed to wait for {}: {e}", self.program))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OmError::RankerUnavailable(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(output.stdout)
    }
}

#[async_trait]
impl ExternalRanker for CommandRanker {
    fn name(&self) -> &str {
        &self.program
    }

    async fn rank(&self, query: &QueryRecord, top_n: usize) -> Result<Vec<ExternalCandidate>> {
        let request = serde_json::to_vec(&RankRequest { query, top_n })?;
        let stdout = self.run(request).await?;
        let text = String::from_utf8_lossy(&stdout);
        let candidates = parse_ranker_response(&text)?;
        debug!(
            program = %self.program,
            candidates = candidates.len(),
            "Parsed ranker output"
        );
        Ok(candidates)
    }
}

/// Parse ranker stdout into candidates.
pub fn parse_ranker_response(text: &str) -> Result<Vec<ExternalCandidate>> {
    let payload = extract_json(text)
        .ok_or_else(|| OmError::RankerResponse("no JSON payload in ranker output".to_string()))?;
    let response: RankResponse = serde_json::from_str(payload)
        .map_err(|e| OmError::RankerResponse(format!("unexpected ranker JSON: {e}")))?;
    Ok(match response {
        RankResponse::List(candidates) | RankResponse::Wrapped { matches: candidates } => {
            candidates
        }
    })
}

/// Locate the JSON payload in free-form output.
///
/// Tries a fenced ```` ```json ```` block, then the whole trimmed text, then
/// the outermost `[...]` span.
fn extract_json(text: &str) -> Option<&str> {
    if let Some(marker) = text.find("```json") {
        let start = marker + "```json".len();
        if let Some(len) = text[start..].find("```") {
            return Some(text[start..start + len].trim());
        }
    }

    let trimmed = text.trim();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Some(trimmed);
    }

    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

//! Match results formatter

use std::fmt::Write as _;

use console::style;
use serde::Serialize;

use crate::cli::output::{Formattable, OutputFormat};
use crate::search::{MatchSource, MergedMatches, ScoredMatch};
use crate::taxonomy::QueryRecord;

/// Results of matching one program.
#[derive(Debug, Clone)]
pub struct MatchResults {
    pub query: QueryRecord,
    pub merged: MergedMatches,
}

/// Serializable match response for JSON output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchResponseJson<'a> {
    status: &'static str,
    query: &'a QueryRecord,
    query_text: String,
    count: usize,
    #[serde(flatten)]
    merged: &'a MergedMatches,
}

impl MatchResults {
    #[must_use]
    pub const fn new(query: QueryRecord, merged: MergedMatches) -> Self {
        Self { query, merged }
    }

    fn all_matches(&self) -> impl Iterator<Item = &ScoredMatch> {
        self.merged
            .local_matches
            .iter()
            .chain(self.merged.external_matches.iter().flatten())
    }

    fn format_json(&self) -> String {
        let response = MatchResponseJson {
            status: "ok",
            query: &self.query,
            query_text: self.query.query_text(),
            count: self.merged.local_matches.len(),
            merged: &self.merged,
        };
        serde_json::to_string_pretty(&response).unwrap_or_default()
    }

    fn format_human(&self) -> String {
        let text = self.query.query_text();
        let mut out = String::new();

        if self.query.is_blank() && self.merged.local_matches.is_empty() {
            let _ = writeln!(out, "{} No query text given", style("!").yellow());
            out.push_str("\nPass --name or --long-name to describe the program.\n");
        } else if self.merged.local_matches.is_empty() {
            let _ = writeln!(
                out,
                "{} No occupations matched '{}'",
                style("!").yellow(),
                style(&text).cyan()
            );
            out.push_str("\nTry:\n");
            out.push_str("  - Adding --long-name or --type for more context\n");
            out.push_str("  - Checking the taxonomy with `occmatch stats`\n");
        } else {
            let _ = writeln!(
                out,
                "{} matches for '{}':\n",
                style(self.merged.local_matches.len()).bold(),
                style(&text).cyan()
            );
            for (i, m) in self.merged.local_matches.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{}. {} {} {}",
                    style(i + 1).dim(),
                    style(&m.entry.code).cyan().bold(),
                    m.entry.title,
                    style(format!("[{:.2}]", m.score())).dim()
                );
                if !m.entry.major_group.is_empty() {
                    let _ = writeln!(out, "   {}", style(&m.entry.major_group).dim());
                }
            }
        }

        if let Some(external) = &self.merged.external_matches {
            let _ = writeln!(out, "\n{}", style("External ranker suggestions:").bold());
            if external.is_empty() {
                out.push_str("  (none)\n");
            }
            for m in external {
                let marker = if m.verified == Some(true) {
                    style("✓").green()
                } else {
                    style("?").yellow()
                };
                let _ = writeln!(
                    out,
                    "{marker} {} {}",
                    style(&m.entry.code).cyan(),
                    m.entry.title
                );
                if let Some(reason) = m.reason.as_deref().filter(|r| !r.is_empty()) {
                    let _ = writeln!(out, "   {}", style(reason).dim());
                }
            }
        }

        out
    }

    fn format_plain(&self) -> String {
        self.all_matches()
            .map(|m| match m.source {
                MatchSource::Local => format!("{}: {:.2}", m.entry.code, m.score()),
                MatchSource::Ai => format!("{}: ai", m.entry.code),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_tsv(&self) -> String {
        let mut out = String::from("rank\tsource\tcode\ttitle\tscore\tverified\n");
        for (i, m) in self.all_matches().enumerate() {
            let source = match m.source {
                MatchSource::Local => "local",
                MatchSource::Ai => "ai",
            };
            let verified = m.verified.map_or_else(String::new, |v| v.to_string());
            let _ = writeln!(
                out,
                "{}\t{source}\t{}\t{}\t{}\t{verified}",
                i + 1,
                m.entry.code,
                m.entry.title.replace(['\t', '\n'], " "),
                score_cell(m)
            );
        }
        out
    }

    fn format_jsonl(&self) -> String {
        self.all_matches()
            .filter_map(|m| serde_json::to_string(m).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Formattable for MatchResults {
    fn format(&self, fmt: OutputFormat) -> String {
        match fmt {
            OutputFormat::Human => self.format_human(),
            OutputFormat::Json => self.format_json(),
            OutputFormat::Jsonl => self.format_jsonl(),
            OutputFormat::Plain => self.format_plain(),
            OutputFormat::Tsv => self.format_tsv(),
        }
    }
}

/// Empty for unscored ranker rows.
fn score_cell(m: &ScoredMatch) -> String {
    m.relevance_score.map_or_else(String::new, |s| format!("{s:.2}"))
}

/// One program's local matches inside a batch run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub program: QueryRecord,
    pub matches: Vec<ScoredMatch>,
}

impl BatchItem {
    fn label(&self, position: usize) -> String {
        self.program
            .id
            .clone()
            .or_else(|| self.program.name.clone())
            .unwrap_or_else(|| format!("#{}", position + 1))
    }
}

/// Results of matching a program file.
#[derive(Debug, Clone)]
pub struct BatchResults {
    pub items: Vec<BatchItem>,
}

#[derive(Serialize)]
struct BatchResponseJson<'a> {
    status: &'static str,
    count: usize,
    results: &'a [BatchItem],
}

impl BatchResults {
    fn format_human(&self) -> String {
        let mut out = format!(
            "Matched {} programs\n",
            style(self.items.len()).bold()
        );
        for (i, item) in self.items.iter().enumerate() {
            let _ = writeln!(out, "\n{}", style(item.label(i)).cyan().bold());
            if item.matches.is_empty() {
                let _ = writeln!(out, "   {}", style("no matches").dim());
            }
            for m in &item.matches {
                let _ = writeln!(
                    out,
                    "   {} {} {}",
                    m.entry.code,
                    m.entry.title,
                    style(format!("[{:.2}]", m.score())).dim()
                );
            }
        }
        out
    }

    fn format_plain(&self) -> String {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let codes: Vec<&str> = item.matches.iter().map(ScoredMatch::code).collect();
                format!("{}: {}", item.label(i), codes.join(","))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_tsv(&self) -> String {
        let mut out = String::from("program\trank\tcode\ttitle\tscore\n");
        for (i, item) in self.items.iter().enumerate() {
            let label = item.label(i).replace(['\t', '\n'], " ");
            for (rank, m) in item.matches.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{label}\t{}\t{}\t{}\t{}",
                    rank + 1,
                    m.entry.code,
                    m.entry.title.replace(['\t', '\n'], " "),
                    score_cell(m)
                );
            }
        }
        out
    }
}

impl Formattable for BatchResults {
    fn format(&self, fmt: OutputFormat) -> String {
        match fmt {
            OutputFormat::Human => self.format_human(),
            OutputFormat::Json => serde_json::to_string_pretty(&BatchResponseJson {
                status: "ok",
                count: self.items.len(),
                results: &self.items,
            })
            .unwrap_or_default(),
            OutputFormat::Jsonl => self
                .items
                .iter()
                .filter_map(|item| serde_json::to_string(item).ok())
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Plain => self.format_plain(),
            OutputFormat::Tsv => self.format_tsv(),
        }
    }
}

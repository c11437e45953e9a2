//! occmatch stats - Index statistics

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{
    HumanLayout, OutputFormat, emit_human, emit_json, emit_jsonl, emit_tsv, robot_ok,
};
use crate::error::Result;
use crate::search::TaxonomyIndex;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Taxonomy JSON file (default: taxonomy.path from config)
    #[arg(long, short)]
    pub taxonomy: Option<PathBuf>,

    /// Number of most frequent keys to show
    #[arg(long, short, default_value = "10")]
    pub limit: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub entries: usize,
    pub keys: usize,
    pub unigrams: usize,
    pub bigrams: usize,
    pub top_keys: Vec<KeyFrequency>,
}

#[derive(Debug, Serialize)]
pub struct KeyFrequency {
    pub key: String,
    pub entries: usize,
}

impl IndexStats {
    #[must_use]
    pub fn collect(index: &TaxonomyIndex, limit: usize) -> Self {
        Self {
            entries: index.len(),
            keys: index.key_count(),
            unigrams: index.unigram_count(),
            bigrams: index.bigram_count(),
            top_keys: index
                .top_keys(limit)
                .into_iter()
                .map(|(key, entries)| KeyFrequency {
                    key: key.to_string(),
                    entries,
                })
                .collect(),
        }
    }
}

pub fn run(ctx: &AppContext, args: &StatsArgs) -> Result<()> {
    let index = ctx.load_index(args.taxonomy.as_deref())?;
    let stats = IndexStats::collect(&index, args.limit);

    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(stats)),
        OutputFormat::Jsonl => emit_jsonl(&stats.top_keys),
        OutputFormat::Tsv => {
            let rows: Vec<Vec<String>> = stats
                .top_keys
                .iter()
                .map(|k| vec![k.key.clone(), k.entries.to_string()])
                .collect();
            emit_tsv(&["key", "entries"], &rows);
            Ok(())
        }
        OutputFormat::Human | OutputFormat::Plain => {
            let mut layout = HumanLayout::new();
            layout
                .title("Taxonomy Index")
                .kv("Entries", &stats.entries.to_string())
                .kv("Keys", &stats.keys.to_string())
                .kv("Unigrams", &stats.unigrams.to_string())
                .kv("Bigrams", &stats.bigrams.to_string())
                .blank()
                .section("Most frequent keys");
            for k in &stats.top_keys {
                layout.kv(&k.key, &k.entries.to_string());
            }
            emit_human(layout);
            Ok(())
        }
    }
}

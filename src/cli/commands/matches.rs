//! occmatch match - Match one program against the taxonomy
//!
//! Runs local lexical scoring, and optionally the configured external ranker
//! as a side channel whose failure never fails the command.

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::formatters::MatchResults;
use crate::cli::output::emit;
use crate::error::Result;
use crate::search::MergedMatches;
use crate::taxonomy::QueryRecord;

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Taxonomy JSON file (default: taxonomy.path from config)
    #[arg(long, short)]
    pub taxonomy: Option<PathBuf>,

    /// Program name
    #[arg(long)]
    pub name: Option<String>,

    /// Full program name
    #[arg(long)]
    pub long_name: Option<String>,

    /// CIP classification code (carried through, not scored)
    #[arg(long)]
    pub cip: Option<String>,

    /// Program type, e.g. Bachelor
    #[arg(long = "type")]
    pub program_type: Option<String>,

    /// Degree designation, e.g. BSN
    #[arg(long)]
    pub degree: Option<String>,

    /// College offering the program
    #[arg(long)]
    pub college: Option<String>,

    /// Program level, e.g. Undergraduate
    #[arg(long)]
    pub level: Option<String>,

    /// Maximum number of matches (default: matcher.default_top_n)
    #[arg(long, short = 'n')]
    pub top: Option<usize>,

    /// Also ask the configured external ranker
    #[arg(long)]
    pub with_ranker: bool,
}

impl MatchArgs {
    #[must_use]
    pub fn query(&self) -> QueryRecord {
        QueryRecord {
            id: None,
            name: self.name.clone(),
            long_name: self.long_name.clone(),
            cip: self.cip.clone(),
            program_type: self.program_type.clone(),
            degree_designation: self.degree.clone(),
            college: self.college.clone(),
            level: self.level.clone(),
        }
    }
}

pub fn run(ctx: &AppContext, args: &MatchArgs) -> Result<()> {
    let index = ctx.load_index(args.taxonomy.as_deref())?;
    let matcher = ctx.matcher(index, args.with_ranker)?;
    let query = args.query();
    let top_n = ctx.top_n(args.top);

    let merged = if matcher.has_ranker() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(matcher.match_and_merge(&query, top_n))
    } else {
        MergedMatches {
            local_matches: matcher.find_matches(&query, top_n),
            external_matches: None,
        }
    };

    debug!(
        local = merged.local_matches.len(),
        external = merged.external_matches.as_ref().map(Vec::len),
        "Match complete"
    );

    emit(&MatchResults::new(query, merged), ctx.output_format);
    Ok(())
}

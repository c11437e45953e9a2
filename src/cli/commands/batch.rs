//! occmatch batch - Match every program in a file
//!
//! Programs are matched in parallel against one shared index; output keeps
//! the input order.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use rayon::prelude::*;
use tracing::info;

use crate::app::AppContext;
use crate::cli::formatters::{BatchItem, BatchResults};
use crate::cli::output::emit;
use crate::error::Result;
use crate::search::{TaxonomyIndex, match_query};
use crate::taxonomy::{QueryRecord, load_programs};

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Program JSON file (array or {"programs": [...]})
    #[arg(long, short)]
    pub programs: PathBuf,

    /// Taxonomy JSON file (default: taxonomy.path from config)
    #[arg(long, short)]
    pub taxonomy: Option<PathBuf>,

    /// Maximum matches per program (default: matcher.default_top_n)
    #[arg(long, short = 'n')]
    pub top: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &BatchArgs) -> Result<()> {
    let index = ctx.load_index(args.taxonomy.as_deref())?;
    let programs = load_programs(&args.programs)?;
    let top_n = ctx.top_n(args.top);

    let started = Instant::now();
    let items = match_all(&index, programs, top_n);
    info!(
        programs = items.len(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "Batch match complete"
    );

    emit(&BatchResults { items }, ctx.output_format);
    Ok(())
}

/// Match programs in parallel, preserving input order.
#[must_use]
pub fn match_all(index: &TaxonomyIndex, programs: Vec<QueryRecord>, top_n: usize) -> Vec<BatchItem> {
    programs
        .into_par_iter()
        .map(|program| {
            let matches = match_query(index, &program, top_n);
            BatchItem { program, matches }
        })
        .collect()
}

//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub mod batch;
pub mod config;
pub mod matches;
pub mod stats;
pub mod tokenize;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Match(args) => matches::run(ctx, args),
        Commands::Batch(args) => batch::run(ctx, args),
        Commands::Stats(args) => stats::run(ctx, args),
        Commands::Tokenize(args) => tokenize::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
    }
}

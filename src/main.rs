//! occmatch - Occupation taxonomy matcher
//!
//! Match academic program descriptions to occupation codes with a local
//! inverted index.

use std::process::ExitCode;

use clap::Parser;
use console::style;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use occmatch::Result;
use occmatch::app::AppContext;
use occmatch::cli::Cli;
use occmatch::cli::output::robot_error_structured;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let format = cli.output_format();
    if !format.use_colors() {
        console::set_colors_enabled(false);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if format.is_machine_readable() {
                // Robot mode: JSON error output to stdout
                let response = robot_error_structured(&e);
                println!("{}", serde_json::to_string(&response).unwrap_or_default());
            } else {
                eprintln!("{} {e}", style("Error:").red().bold());
                eprintln!("{}", style(e.code().suggestion()).dim());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    occmatch::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,occmatch=info",
        1 => "info,occmatch=debug",
        2 => "debug,occmatch=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.output_format().is_machine_readable() {
        // JSON logging for robot mode
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

//! occmatch config - Show the effective configuration

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::config::{Config, PROJECT_CONFIG_FILE};
use crate::error::{OmError, Result};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print config file locations instead of values
    #[arg(long)]
    pub paths: bool,
}

pub fn run(ctx: &AppContext, args: &ConfigArgs) -> Result<()> {
    if args.paths {
        return emit_paths(ctx);
    }

    match ctx.output_format {
        OutputFormat::Json | OutputFormat::Jsonl => emit_json(&robot_ok(&ctx.config)),
        _ => {
            let raw = toml::to_string_pretty(&ctx.config)
                .map_err(|err| OmError::Config(format!("serialize config: {err}")))?;
            print!("{raw}");
            Ok(())
        }
    }
}

fn emit_paths(ctx: &AppContext) -> Result<()> {
    let global = Config::global_path().map(|p| p.display().to_string());
    let project = ctx.project_root.join(PROJECT_CONFIG_FILE).display().to_string();

    if ctx.output_format.is_machine_readable() {
        return emit_json(&robot_ok(serde_json::json!({
            "global": global,
            "project": project,
        })));
    }

    let mut layout = HumanLayout::new();
    layout
        .kv("Global", global.as_deref().unwrap_or("(none)"))
        .kv("Project", &project);
    emit_human(layout);
    Ok(())
}

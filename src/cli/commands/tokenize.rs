//! occmatch tokenize - Show tokens and bigrams for a piece of text

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::error::Result;
use crate::search::{bigrams, tokenize};

#[derive(Args, Debug)]
pub struct TokenizeArgs {
    /// Text to tokenize
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TokenizeOutput {
    pub tokens: Vec<String>,
    pub bigrams: Vec<String>,
}

impl TokenizeOutput {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let tokens = tokenize(text);
        let bigrams = bigrams(&tokens);
        Self { tokens, bigrams }
    }
}

pub fn run(ctx: &AppContext, args: &TokenizeArgs) -> Result<()> {
    let output = TokenizeOutput::from_text(&args.text);

    match ctx.output_format {
        OutputFormat::Json | OutputFormat::Jsonl => emit_json(&robot_ok(output)),
        OutputFormat::Plain | OutputFormat::Tsv => {
            println!("{}", output.tokens.join(" "));
            println!("{}", output.bigrams.join(" "));
            Ok(())
        }
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            layout
                .kv("Tokens", &output.tokens.join(" "))
                .kv("Bigrams", &output.bigrams.join(" "));
            emit_human(layout);
            Ok(())
        }
    }
}

//! Words command: browse the vocabulary.

use clap::Args;
use hotcold_core::Config;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use super::load_vocabulary;

/// Words shown without `--all`.
const PAGE_SIZE: usize = 100;

/// Arguments for the `words` subcommand.
#[derive(Args, Debug, Default)]
pub struct WordsArgs {
    /// Only show words containing TERM.
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Show every match instead of the first 100.
    #[arg(long)]
    pub all: bool,
}

#[derive(Serialize)]
struct WordsReport<'a> {
    matched: usize,
    truncated: bool,
    words: &'a [&'a str],
}

/// List vocabulary words alphabetically.
#[instrument(name = "cmd_words", skip_all, fields(search = ?args.search, all = args.all))]
pub fn cmd_words(args: WordsArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!("executing words command");

    let vocabulary = load_vocabulary(config)?;
    let matches = vocabulary.browse(None, args.search.as_deref());
    let shown = if args.all {
        &matches[..]
    } else {
        &matches[..matches.len().min(PAGE_SIZE)]
    };

    if global_json {
        let report = WordsReport {
            matched: matches.len(),
            truncated: shown.len() < matches.len(),
            words: shown,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for word in shown {
        println!("{word}");
    }
    if shown.len() < matches.len() {
        eprintln!(
            "{}",
            format!(
                "... {} more (use --all to list everything)",
                matches.len() - shown.len()
            )
            .dimmed()
        );
    }
    Ok(())
}

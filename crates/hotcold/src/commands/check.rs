//! Check command: run the guess validator on one word.

use anyhow::bail;
use clap::Args;
use hotcold_core::{Config, validate_guess};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use super::load_vocabulary;

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// The word to check.
    pub word: String,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    word: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Validate a word; exits non-zero with the reason when it is rejected.
#[instrument(name = "cmd_check", skip_all, fields(word = %args.word))]
pub fn cmd_check(args: CheckArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!("executing check command");

    let vocabulary = load_vocabulary(config)?;
    let verdict = validate_guess(&args.word, &vocabulary);

    if global_json {
        let report = CheckReport {
            word: &args.word,
            valid: verdict.is_ok(),
            reason: verdict.as_ref().err().map(ToString::to_string),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    match verdict {
        Ok(()) => {
            if !global_json {
                println!("{} {}", "OK:".green(), args.word.trim().to_lowercase());
            }
            Ok(())
        }
        Err(reason) => bail!("{reason}"),
    }
}

//! Rank command: the full similarity ranking for one target.

use anyhow::{Context, bail};
use clap::Args;
use hotcold_core::{Config, WordRanking, compute_rankings};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{load_vocabulary, model_cache, spinner};

/// Arguments for the `rank` subcommand.
#[derive(Args, Debug)]
pub struct RankArgs {
    /// Target word to rank the vocabulary against.
    pub target: String,

    /// Number of closest words to show.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub top: usize,
}

#[derive(Serialize)]
struct RankReport<'a> {
    target: &'a str,
    provider: &'a str,
    total_words: usize,
    rankings: &'a [WordRanking],
}

/// Compute the ranking for a target and print the closest words.
#[instrument(name = "cmd_rank", skip_all, fields(target = %args.target, top = args.top))]
pub async fn cmd_rank(args: RankArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!("executing rank command");

    let target = args.target.trim().to_lowercase();
    if target.is_empty() {
        bail!("target word cannot be empty");
    }

    let vocabulary = load_vocabulary(config)?;
    let provider = model_cache(config)
        .get()
        .await
        .context("failed to set up embedding provider")?;

    let progress = spinner(
        &format!("Ranking {} words against {target}...", vocabulary.len()),
        global_json,
    )?;
    let result = compute_rankings(&target, vocabulary.words(), provider.as_ref()).await;
    progress.finish_and_clear();
    let rankings = result.with_context(|| format!("failed to rank words against {target}"))?;

    let top = rankings.top(args.top);

    if global_json {
        let report = RankReport {
            target: &target,
            provider: provider.name(),
            total_words: rankings.len(),
            rankings: top,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        "Closest to".bold(),
        target.bold().green(),
        format!("({} ranked, provider: {})", rankings.len(), provider.name()).dimmed()
    );
    let width = top.last().map_or(1, |r| r.rank.to_string().len());
    for entry in top {
        println!(
            "{:>width$}. {:<16} {}",
            entry.rank,
            entry.word,
            format!("{:.4}", entry.similarity).dimmed(),
        );
    }
    Ok(())
}

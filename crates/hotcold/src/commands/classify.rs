//! Classify command: rank to temperature.

use clap::Args;
use hotcold_core::feedback::{self, Tier};
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

/// Arguments for the `classify` subcommand.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Rank of the guess (1 is closest).
    pub rank: usize,

    /// Number of ranked words.
    pub total: usize,
}

/// Print the tier, emoji and message for a rank.
#[instrument(name = "cmd_classify", skip_all, fields(rank = args.rank, total = args.total))]
pub fn cmd_classify(args: ClassifyArgs, global_json: bool) -> anyhow::Result<()> {
    debug!("executing classify command");

    let feedback = feedback::classify(args.rank, args.total)?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&feedback)?);
    } else {
        println!(
            "{} {} {}",
            feedback.emoji,
            paint_tier(feedback.tier, feedback.message),
            format!("(rank {} of {})", args.rank, args.total).dimmed()
        );
    }
    Ok(())
}

/// Color a message by its tier.
pub(crate) fn paint_tier(tier: Tier, text: &str) -> String {
    match tier {
        Tier::Best | Tier::TopTier => text.red().bold().to_string(),
        Tier::Hot => text.red().to_string(),
        Tier::Warm => text.yellow().to_string(),
        Tier::Cool => text.cyan().to_string(),
        Tier::Cold | Tier::IceCold => text.blue().to_string(),
    }
}

//! Play command: an interactive game on stdin/stdout.
//!
//! Each input line is a guess, except for these meta commands:
//!
//! - `/history` - guesses so far, closest first
//! - `/words [TERM]` - browse the word list
//! - `/giveup` - reveal the word (after enough guesses)
//! - `/help` - list commands
//! - `/quit` - leave without revealing the word
//!
//! With `--json`, every event is written as one JSON object per line.

use std::io::{BufRead, Write};

use anyhow::Context;
use clap::Args;
use hotcold_core::{
    Config, GameError, GameOptions, GameSession, GameSummary, GuessData, GuessOutcome,
    classify,
};
use owo_colors::OwoColorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, instrument};

use super::classify::paint_tier;
use super::{load_vocabulary, model_cache, spinner};

/// Words listed by `/words` per call.
const WORDS_PER_PAGE: usize = 100;

/// Arguments for the `play` subcommand.
#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Play against this word instead of a random one.
    #[arg(long, value_name = "WORD")]
    pub target: Option<String>,

    /// Seed the random target choice (repeatable games).
    #[arg(long, value_name = "N", conflicts_with = "target")]
    pub seed: Option<u64>,
}

/// One line of `--json` output.
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    Start {
        target_len: usize,
        total_words: usize,
        give_up_after: usize,
    },
    Guess {
        result: &'a GuessOutcome,
    },
    Rejected {
        input: &'a str,
        reason: String,
    },
    History {
        guesses: Vec<&'a GuessData>,
    },
    Words {
        matched: usize,
        words: Vec<&'a str>,
    },
    GaveUp {
        target: &'a str,
        guesses: usize,
    },
    End {
        summary: GameSummary,
    },
}

/// Run an interactive game.
#[instrument(name = "cmd_play", skip_all, fields(seeded = args.seed.is_some()))]
pub async fn cmd_play(args: PlayArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!("executing play command");

    let vocabulary = load_vocabulary(config)?;
    let model = model_cache(config);
    let options = GameOptions::from(config);

    let mut session = match (args.target, args.seed) {
        (Some(target), _) => GameSession::with_target(&target, vocabulary, model, options)
            .with_context(|| format!("cannot play against {target:?}"))?,
        (None, Some(seed)) => {
            GameSession::with_rng(vocabulary, model, options, &mut StdRng::seed_from_u64(seed))
        }
        (None, None) => GameSession::new(vocabulary, model, options),
    };

    let progress = spinner("Computing word rankings...", global_json)?;
    let ranked = session.rankings().await;
    progress.finish_and_clear();
    ranked.context("failed to compute word rankings")?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_game(&mut session, stdin.lock(), stdout.lock(), global_json).await
}

/// Drive a game from `input` until it ends or the input runs out.
pub async fn run_game<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: R,
    mut out: W,
    json: bool,
) -> anyhow::Result<()> {
    let total_words = session.rankings().await?.len();
    if json {
        emit(
            &mut out,
            &Event::Start {
                target_len: session.target_len(),
                total_words,
                give_up_after: session.give_up_remaining(),
            },
        )?;
    } else {
        writeln!(out, "{}", "HOT OR COLD".bold())?;
        writeln!(
            out,
            "The secret word has {} letters. {} words are ranked by closeness in meaning.",
            session.target_len().bold(),
            total_words
        )?;
        writeln!(out, "{}", "Type a guess, or /help for commands.".dimmed())?;
    }

    let mut lines = input.lines();
    loop {
        if !json {
            write!(out, "{} ", ">".bold())?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        match command {
            "/quit" | "/exit" => break,
            "/help" => {
                if !json {
                    writeln!(
                        out,
                        "/history  your guesses, closest first\n/words [TERM]  browse the word list\n/giveup  reveal the word\n/quit  leave"
                    )?;
                }
            }
            "/history" => show_history(session, &mut out, json)?,
            "/words" => show_words(session, rest.trim(), &mut out, json)?,
            "/giveup" => match session.give_up() {
                Ok(target) => {
                    let target = target.to_string();
                    if json {
                        emit(
                            &mut out,
                            &Event::GaveUp {
                                target: &target,
                                guesses: session.guess_count(),
                            },
                        )?;
                    } else {
                        writeln!(out, "The word was {}.", target.to_uppercase().bold())?;
                    }
                    break;
                }
                Err(err) => reject(&mut out, json, line, &err)?,
            },
            _ => match session.submit(line).await {
                Ok(outcome) => {
                    let won = matches!(outcome, GuessOutcome::Won { .. });
                    show_outcome(&outcome, &mut out, json)?;
                    if won {
                        break;
                    }
                }
                Err(err) if err.is_user_error() => reject(&mut out, json, line, &err)?,
                Err(err) => return Err(err).context("failed to score guess"),
            },
        }
    }

    if json {
        emit(
            &mut out,
            &Event::End {
                summary: session.summary(),
            },
        )?;
    }
    debug!(status = ?session.status(), guesses = session.guess_count(), "game finished");
    Ok(())
}

fn emit<W: Write>(out: &mut W, event: &Event<'_>) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    writeln!(out)?;
    Ok(())
}

fn reject<W: Write>(out: &mut W, json: bool, input: &str, err: &GameError) -> anyhow::Result<()> {
    if json {
        emit(
            out,
            &Event::Rejected {
                input,
                reason: err.to_string(),
            },
        )
    } else {
        writeln!(out, "{}", err.to_string().yellow())?;
        Ok(())
    }
}

fn show_outcome<W: Write>(outcome: &GuessOutcome, out: &mut W, json: bool) -> anyhow::Result<()> {
    if json {
        return emit(out, &Event::Guess { result: outcome });
    }
    match outcome {
        GuessOutcome::Ranked { guess, feedback } => {
            writeln!(
                out,
                "{} #{} / {}  {}",
                feedback.emoji,
                guess.rank.bold(),
                guess.total_words,
                paint_tier(feedback.tier, feedback.message)
            )?;
        }
        GuessOutcome::Won { word, guesses } => {
            let noun = if *guesses == 1 { "guess" } else { "guesses" };
            writeln!(out, "🎉 {}", "CONGRATULATIONS!".bold().green())?;
            writeln!(
                out,
                "You found {} in {} {noun}!",
                word.to_uppercase().bold(),
                guesses
            )?;
        }
    }
    Ok(())
}

fn show_history<W: Write>(session: &GameSession, out: &mut W, json: bool) -> anyhow::Result<()> {
    let guesses = session.history_by_rank();
    if json {
        return emit(out, &Event::History { guesses });
    }
    if guesses.is_empty() {
        writeln!(out, "{}", "No guesses yet.".dimmed())?;
        return Ok(());
    }
    for guess in guesses {
        let tier = classify(guess.rank, guess.total_words)?.tier;
        writeln!(
            out,
            "{:>6}  {}",
            format!("#{}", guess.rank),
            paint_tier(tier, &guess.word)
        )?;
    }
    Ok(())
}

fn show_words<W: Write>(
    session: &GameSession,
    term: &str,
    out: &mut W,
    json: bool,
) -> anyhow::Result<()> {
    let search = (!term.is_empty()).then_some(term);
    let matches = session.vocabulary().browse(Some(session.target()), search);
    let shown: Vec<&str> = matches.iter().take(WORDS_PER_PAGE).copied().collect();

    if json {
        return emit(
            out,
            &Event::Words {
                matched: matches.len(),
                words: shown,
            },
        );
    }

    let marked: Vec<String> = shown
        .iter()
        .map(|w| {
            if session.has_guessed(w) {
                w.dimmed().to_string()
            } else {
                (*w).to_string()
            }
        })
        .collect();
    writeln!(out, "{}", marked.join(" "))?;
    if matches.len() > shown.len() {
        writeln!(
            out,
            "{}",
            format!("... {} more; narrow with /words TERM", matches.len() - shown.len()).dimmed()
        )?;
    }
    Ok(())
}

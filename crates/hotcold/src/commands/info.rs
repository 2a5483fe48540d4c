//! Info command: build metadata and the effective configuration.

use std::fmt::Display;
use std::io::Write;

use clap::Args;
use hotcold_core::config::{Config, ConfigSources};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use super::load_vocabulary;

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

/// Crate metadata baked in at compile time.
#[derive(Serialize)]
struct Build {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    license: &'static str,
    repository: &'static str,
}

static BUILD: Build = Build {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
    description: env!("CARGO_PKG_DESCRIPTION"),
    license: env!("CARGO_PKG_LICENSE"),
    repository: env!("CARGO_PKG_REPOSITORY"),
};

/// The settings a game would start with.
#[derive(Serialize)]
struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    embedding_provider: String,
    embedding_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    embedding_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    embedding_dimensions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    embedding_table: Option<String>,
    api_key_set: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    vocabulary_file: Option<String>,
    /// `None` when the configured word list cannot be read.
    vocabulary_words: Option<usize>,
    give_up_after: usize,
}

impl Settings {
    fn resolve(config: &Config, sources: &ConfigSources) -> Self {
        let text = |path: &camino::Utf8PathBuf| path.to_string();
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str(),
            log_dir: config.log_dir.as_ref().map(text),
            embedding_provider: config.embedding_provider.to_string(),
            embedding_model: config.embedding_model().to_string(),
            embedding_base_url: config.embedding_base_url.clone(),
            embedding_dimensions: config.embedding_dimensions,
            embedding_table: config.embedding_table.as_ref().map(text),
            api_key_set: config.openai_api_key.is_some()
                || std::env::var_os("OPENAI_API_KEY").is_some(),
            vocabulary_file: config.vocabulary_file.as_ref().map(text),
            vocabulary_words: load_vocabulary(config).ok().map(|v| v.len()),
            give_up_after: config.give_up_after(),
        }
    }
}

#[derive(Serialize)]
struct Report {
    #[serde(flatten)]
    build: &'static Build,
    config: Settings,
}

/// Show the version and the effective configuration.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let report = Report {
        build: &BUILD,
        config: Settings::resolve(config, sources),
    };

    let mut out = std::io::stdout().lock();
    if global_json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        render(&report, &mut out)?;
    }
    Ok(())
}

fn render<W: Write>(report: &Report, out: &mut W) -> std::io::Result<()> {
    let build = report.build;
    let settings = &report.config;

    writeln!(out, "{} {}", build.name.bold(), build.version.green())?;
    writeln!(out, "{}", build.description)?;
    field(out, "License", build.license)?;
    field(out, "Repository", build.repository.cyan())?;

    heading(out, "Configuration")?;
    match settings.config_file {
        Some(ref path) => field(out, "Config file", path.cyan())?,
        None => field(out, "Config file", "none loaded".yellow())?,
    }
    field(out, "Log level", settings.log_level)?;
    if let Some(ref dir) = settings.log_dir {
        field(out, "Log directory", dir)?;
    }

    heading(out, "Embeddings")?;
    field(out, "Provider", settings.embedding_provider.cyan())?;
    field(out, "Model", &settings.embedding_model)?;
    field_or_unset(out, "Base URL", settings.embedding_base_url.as_ref())?;
    field_or_unset(out, "Dimensions", settings.embedding_dimensions.as_ref())?;
    field_or_unset(out, "Vector table", settings.embedding_table.as_ref())?;
    if settings.api_key_set {
        field(out, "API key", "set".green())?;
    } else {
        field(out, "API key", "not set".yellow())?;
    }

    heading(out, "Game")?;
    let source = settings.vocabulary_file.as_deref().unwrap_or("built-in");
    match settings.vocabulary_words {
        Some(count) => field(out, "Vocabulary", format!("{source} ({count} words)"))?,
        None => field(out, "Vocabulary", format!("{source} ({})", "unreadable".red()))?,
    }
    field(out, "Give up after", format!("{} guesses", settings.give_up_after))
}

fn heading<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title.bold().underline())
}

fn field<W: Write>(out: &mut W, label: &str, value: impl Display) -> std::io::Result<()> {
    writeln!(out, "{}: {value}", label.dimmed())
}

fn field_or_unset<W: Write, T: Display>(
    out: &mut W,
    label: &str,
    value: Option<&T>,
) -> std::io::Result<()> {
    match value {
        Some(v) => field(out, label, v),
        None => field(out, label, "(not set)".dimmed()),
    }
}

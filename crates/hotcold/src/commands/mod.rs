//! Command implementations.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use hotcold_core::{Config, ModelCache, Vocabulary};
use indicatif::{ProgressBar, ProgressStyle};

pub mod check;
pub mod classify;
pub mod info;
pub mod play;
pub mod rank;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod words;

/// The configured vocabulary, or the built-in one.
pub fn load_vocabulary(config: &Config) -> anyhow::Result<Arc<Vocabulary>> {
    match config.vocabulary_file {
        Some(ref path) => {
            let vocabulary = Vocabulary::from_file(path)
                .with_context(|| format!("failed to load vocabulary from {path}"))?;
            Ok(Arc::new(vocabulary))
        }
        None => Ok(Vocabulary::builtin()),
    }
}

/// Provider cache for the configured embedding backend.
pub fn model_cache(config: &Config) -> Arc<ModelCache> {
    Arc::new(ModelCache::from_config(config.clone()))
}

/// Stderr spinner; hidden when output is machine-readable.
pub fn spinner(message: &str, hidden: bool) -> anyhow::Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
}

//! Configuration loading and discovery.
//!
//! Settings are layered with figment, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. User config: `~/.config/hotcold/config.<ext>`
//! 3. Project config from the closest directory (walking up from the
//!    search root) containing any of `.hot-or-cold.<ext>`,
//!    `hot-or-cold.<ext>`, `.hotcold.<ext>`, `hotcold.<ext>`
//! 4. Files passed explicitly (`--config`)
//! 5. `HOTCOLD_*` environment variables (`HOTCOLD_EMBEDDING_PROVIDER=hashing`)
//!
//! `<ext>` is one of `toml`, `yaml`, `yml`, `json`. The upward walk stops at
//! a directory containing `.git` unless the boundary is disabled.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use hotcold_core::config::ConfigLoader;
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir().unwrap()).unwrap();
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("provider: {}", config.embedding_provider);
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default number of guesses before giving up is allowed.
pub const DEFAULT_GIVE_UP_AFTER: usize = 10;

/// Default model for the OpenAI-compatible provider.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Which embedding provider backs the ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EmbeddingBackend {
    /// OpenAI-compatible `/embeddings` endpoint.
    #[default]
    #[cfg_attr(feature = "clap", value(name = "openai"))]
    OpenAi,
    /// Local character-trigram hashing; deterministic and offline.
    Hashing,
    /// Precomputed vectors from a JSON file.
    Table,
}

impl EmbeddingBackend {
    /// Returns the backend name as used in config files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Hashing => "hashing",
            Self::Table => "table",
        }
    }
}

impl std::fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The configuration for hotcold.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files (falls back to platform defaults if unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Replace the built-in vocabulary with this word file.
    pub vocabulary_file: Option<Utf8PathBuf>,
    /// Embedding provider used to rank words.
    pub embedding_provider: EmbeddingBackend,
    /// Model name for the OpenAI-compatible provider.
    pub embedding_model: Option<String>,
    /// Base URL for the OpenAI-compatible provider.
    pub embedding_base_url: Option<String>,
    /// Requested output dimension (OpenAI) or vector size (hashing).
    pub embedding_dimensions: Option<u32>,
    /// JSON file of precomputed vectors for the `table` provider.
    pub embedding_table: Option<Utf8PathBuf>,
    /// API key for the OpenAI-compatible provider; `OPENAI_API_KEY` is used if unset.
    pub openai_api_key: Option<String>,
    /// Guesses required before giving up is allowed (default: 10).
    pub give_up_after: Option<usize>,
}

impl Config {
    /// Model name for the OpenAI-compatible provider, with the default applied.
    pub fn embedding_model(&self) -> &str {
        self.embedding_model
            .as_deref()
            .unwrap_or(DEFAULT_EMBEDDING_MODEL)
    }

    /// Give-up threshold with the default applied.
    pub fn give_up_after(&self) -> usize {
        self.give_up_after.unwrap_or(DEFAULT_GIVE_UP_AFTER)
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Which configuration files were merged by [`ConfigLoader::load()`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files, ordered low to high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from the platform config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files passed explicitly (e.g. `--config`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The highest-precedence file that was loaded, if any.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .or_else(|| self.project_files.last())
            .map(Utf8PathBuf::as_path)
            .or(self.user_file.as_deref())
    }
}

const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

const APP_NAME: &str = "hotcold";

/// Config file stems, lowest precedence first.
const APP_NAMES: &[&str] = &["hot-or-cold", "hotcold"];

const ENV_PREFIX: &str = "HOTCOLD_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a loader that reads user config and stops project search at `.git`.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Walk up from `path` looking for project config.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include `~/.config/hotcold/config.<ext>`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Stop the upward walk at a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Search all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file; later files win.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every discovered source and extract the [`Config`].
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = find_user_config()
        {
            figment = merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for path in &project_configs {
                figment = merge_file(figment, path);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::debug!(
            log_level = config.log_level.as_str(),
            provider = config.embedding_provider.as_str(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Like [`load`](Self::load), but fails when no config file exists anywhere.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let has_user = self.include_user_config && find_user_config().is_some();
        let has_project = self
            .project_search_root
            .as_ref()
            .is_some_and(|root| !self.find_project_configs(root).is_empty());

        if !has_user && !has_project && self.explicit_files.is_empty() {
            return Err(ConfigError::NotFound);
        }

        self.load()
    }

    /// Config files from the closest directory that has any, low to high precedence.
    ///
    /// Within a directory, dotfiles come before regular files of the same stem.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        for dir in start.ancestors() {
            let found: Vec<Utf8PathBuf> = APP_NAMES
                .iter()
                .flat_map(|name| [format!(".{name}"), (*name).to_string()])
                .flat_map(|stem| {
                    CONFIG_EXTENSIONS
                        .iter()
                        .map(move |ext| dir.join(format!("{stem}.{ext}")))
                })
                .filter(|path| path.is_file())
                .collect();

            if !found.is_empty() {
                return found;
            }

            // The marker directory itself is searched; its parents are not.
            if let Some(ref marker) = self.boundary_marker
                && dir != start
                && dir.join(marker).exists()
            {
                break;
            }
        }

        Vec::new()
    }
}

fn find_user_config() -> Option<Utf8PathBuf> {
    let config_dir = user_config_dir()?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| config_dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// The user config directory (`~/.config/hotcold/` on Linux).
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

/// The user data directory (`~/.local/share/hotcold/` on Linux); default log location.
pub fn user_data_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.data_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path).unwrap()
    }

    fn isolated() -> ConfigLoader {
        ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.embedding_provider, EmbeddingBackend::OpenAi);
        assert_eq!(config.embedding_model(), DEFAULT_EMBEDDING_MODEL);
        assert_eq!(config.give_up_after(), DEFAULT_GIVE_UP_AFTER);
        assert!(config.vocabulary_file.is_none());
    }

    #[test]
    fn test_loader_builds_with_defaults() {
        let (config, sources) = isolated().load().unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn test_single_file_overrides_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(
            &config_path,
            r#"log_level = "debug"
embedding_provider = "hashing"
embedding_dimensions = 64
give_up_after = 3
"#,
        )
        .unwrap();

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(config_path))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.embedding_provider, EmbeddingBackend::Hashing);
        assert_eq!(config.embedding_dimensions, Some(64));
        assert_eq!(config.give_up_after(), 3);
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base.toml");
        fs::write(&base, r#"embedding_model = "small""#).unwrap();
        let over = tmp.path().join("override.yaml");
        fs::write(&over, "embedding_model: large\n").unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(base))
            .with_file(utf8(over))
            .load()
            .unwrap();

        assert_eq!(config.embedding_model(), "large");
        assert!(sources.primary_file().unwrap().as_str().ends_with("override.yaml"));
    }

    #[test]
    fn test_project_config_discovery() {
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join("project");
        let sub_dir = project_dir.join("src").join("deep");
        fs::create_dir_all(&sub_dir).unwrap();
        fs::write(project_dir.join(".hotcold.toml"), r#"log_level = "debug""#).unwrap();

        let (config, sources) = isolated()
            .with_project_search(utf8(sub_dir))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn test_boundary_marker_stops_search() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();
        fs::write(parent.join(".hotcold.toml"), r#"log_level = "warn""#).unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(utf8(work))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn test_config_next_to_boundary_marker_is_found() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo");
        let work = repo.join("work");
        fs::create_dir_all(&work).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        fs::write(repo.join("hotcold.toml"), r#"log_level = "error""#).unwrap();

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(utf8(work))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn test_hotcold_overrides_hot_or_cold() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".hot-or-cold.toml"),
            "embedding_provider = \"table\"\nlog_level = \"debug\"\n",
        )
        .unwrap();
        fs::write(tmp.path().join("hotcold.toml"), r#"log_level = "warn""#).unwrap();

        let (config, sources) = isolated()
            .with_project_search(utf8(tmp.path().to_path_buf()))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.embedding_provider, EmbeddingBackend::Table);
        assert_eq!(sources.project_files.len(), 2);
    }

    #[test]
    fn test_only_closest_directory_contributes() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        fs::create_dir_all(&child).unwrap();
        fs::write(parent.join("hotcold.toml"), "give_up_after = 1\n").unwrap();
        fs::write(child.join(".hotcold.json"), r#"{"log_level": "error"}"#).unwrap();

        let (config, sources) = isolated().with_project_search(utf8(child)).load().unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.give_up_after(), DEFAULT_GIVE_UP_AFTER);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn test_invalid_provider_is_rejected() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, r#"embedding_provider = "word2vec""#).unwrap();

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(path))
            .load();

        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_load_or_error_fails_when_no_config() {
        let result = isolated().load_or_error();
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn test_backend_deserialization_from_yaml() {
        for (input, expected) in [
            ("openai", EmbeddingBackend::OpenAi),
            ("hashing", EmbeddingBackend::Hashing),
            ("table", EmbeddingBackend::Table),
        ] {
            let config: Config =
                serde_yaml::from_str(&format!("embedding_provider: {input}\n")).unwrap();
            assert_eq!(config.embedding_provider, expected, "failed for {input}");
            assert_eq!(expected.as_str(), input);
        }
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_env_var_overrides_file_config() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "embedding_provider = \"openai\"\n").unwrap();

        // SAFETY: Test environment; the mutex serializes env access across tests.
        unsafe {
            std::env::set_var("HOTCOLD_EMBEDDING_PROVIDER", "hashing");
        }

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(path))
            .load()
            .unwrap();

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("HOTCOLD_EMBEDDING_PROVIDER");
        }

        assert_eq!(config.embedding_provider, EmbeddingBackend::Hashing);
    }

    #[test]
    fn test_user_config_dir_names_app() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("hotcold"));
        }
    }
}

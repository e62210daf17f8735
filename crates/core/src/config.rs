//! Configuration management for Lexis.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Config files (.lexis/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources take precedence over earlier ones.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Default number of words per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Default number of words shared by neighbouring chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Default number of hits returned by an exploratory search.
pub const DEFAULT_TOP_K: usize = 5;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .lexis/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Words per chunk
    pub chunk_size: usize,

    /// Words shared between consecutive chunks
    pub chunk_overlap: usize,

    /// Hits returned by search when the caller does not ask for a count
    pub top_k: usize,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
    retrieval: Option<RetrievalConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfig {
    chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
    top_k: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, environment variables and defaults.
    ///
    /// Environment variables:
    /// - `LEXIS_WORKSPACE`: Override workspace path
    /// - `LEXIS_CONFIG`: Path to config file
    /// - `LEXIS_CHUNK_SIZE`: Words per chunk
    /// - `LEXIS_CHUNK_OVERLAP`: Words of overlap between chunks
    /// - `LEXIS_TOP_K`: Default number of search hits
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use lexis_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Chunk size: {}", config.chunk_size);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Like [`AppConfig::load`], with a workspace and config file given on the
    /// command line.
    ///
    /// Both paths win over `LEXIS_WORKSPACE` and `LEXIS_CONFIG` and decide
    /// which YAML file is merged.
    pub fn load_from(workspace: Option<&Path>, config_file: Option<&Path>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = workspace {
            config.workspace = workspace.to_path_buf();
        } else if let Ok(workspace) = std::env::var("LEXIS_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Some(config_file) = config_file {
            config.config_file = Some(config_file.to_path_buf());
        } else if let Ok(config_file) = std::env::var("LEXIS_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if let Some(path) = &config.config_file {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "Config file does not exist: {:?}",
                    path
                )));
            }
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.lexis_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Some(size) = env_number("LEXIS_CHUNK_SIZE")? {
            config.chunk_size = size;
        }
        if let Some(overlap) = env_number("LEXIS_CHUNK_OVERLAP")? {
            config.chunk_overlap = overlap;
        }
        if let Some(top_k) = env_number("LEXIS_TOP_K")? {
            config.top_k = top_k;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into a copy of this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(path) = config_file.workspace.and_then(|ws| ws.path) {
            result.workspace = PathBuf::from(path);
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(retrieval) = config_file.retrieval {
            if let Some(size) = retrieval.chunk_size {
                result.chunk_size = size;
            }
            if let Some(overlap) = retrieval.chunk_overlap {
                result.chunk_overlap = overlap;
            }
            if let Some(top_k) = retrieval.top_k {
                result.top_k = top_k;
            }
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables and
    /// the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
        chunk_size: Option<usize>,
        chunk_overlap: Option<usize>,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        if let Some(size) = chunk_size {
            self.chunk_size = size;
        }

        if let Some(overlap) = chunk_overlap {
            self.chunk_overlap = overlap;
        }

        self
    }

    /// Get the path to the .lexis directory.
    pub fn lexis_dir(&self) -> PathBuf {
        self.workspace.join(".lexis")
    }

    /// Validate retrieval settings.
    pub fn validate(&self) -> AppResult<()> {
        if self.chunk_size == 0 {
            return Err(AppError::Config("chunk_size must be positive".to_string()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(AppError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.top_k == 0 {
            return Err(AppError::Config("top_k must be positive".to_string()));
        }
        Ok(())
    }
}

/// Read an optional numeric environment variable.
fn env_number<T: FromStr>(name: &str) -> AppResult<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{} is not a valid number: {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}

//! Configuration handling for Gator
//!
//! Configuration is stored in `gator.toml` (project, current directory)
//! and `~/.config/gator/config.toml` (global). Project values override
//! global ones.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the project configuration
pub const PROJECT_CONFIG_FILE: &str = "gator.toml";

/// Environment variable overriding the default checker directory
pub const CHECKER_DIR_ENV: &str = "GATOR_CHECKER_DIR";

/// Fallback checker directory when no data directory is known
pub const FALLBACK_CHECKER_DIR: &str = ".gator/checks";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for check reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One configuration layer; unset values fall through to the next layer
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigFile {
    /// Checker directory used when `--checkerdir` is not given
    pub checker_dir: Option<PathBuf>,

    /// Extra checker directories, scanned before the checker directory
    pub checker_dirs: Vec<PathBuf>,

    /// Default output format
    pub default_format: Option<OutputFormat>,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub checker_dir: Option<PathBuf>,
    pub checker_dirs: Vec<PathBuf>,
    pub default_format: OutputFormat,
}

impl Config {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self> {
        let global = match Self::global_config_dir() {
            Some(dir) => Self::load_file(&dir.join("config.toml"))?,
            None => ConfigFile::default(),
        };
        let project = Self::load_file(Path::new(PROJECT_CONFIG_FILE))?;

        Ok(Self::merge(global, project))
    }

    /// Layers the project configuration over the global one
    pub fn merge(global: ConfigFile, project: ConfigFile) -> Self {
        let mut checker_dirs = global.checker_dirs;
        checker_dirs.extend(project.checker_dirs);

        Self {
            checker_dir: project.checker_dir.or(global.checker_dir),
            checker_dirs,
            default_format: project
                .default_format
                .or(global.default_format)
                .unwrap_or_default(),
        }
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "gator", "gator").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads one configuration file; a missing file is an empty layer
    pub fn load_file(path: &Path) -> Result<ConfigFile> {
        if !path.exists() {
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Returns the checker directory used when none is given on the
    /// command line: the environment, then configuration, then the
    /// user's data directory.
    pub fn default_checker_dir(&self) -> PathBuf {
        if let Some(dir) = std::env::var_os(CHECKER_DIR_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(dir);
        }

        if let Some(dir) = &self.checker_dir {
            return dir.clone();
        }

        ProjectDirs::from("dev", "gator", "gator")
            .map(|dirs| dirs.data_dir().join("checks"))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_CHECKER_DIR))
    }
}

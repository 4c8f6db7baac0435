//! Checker discovery and loading
//!
//! Checkers come from two places:
//! 1. The built-in checks compiled into Gator
//! 2. Files named `check_*` in checker directories
//!
//! Sources are registered in order and a later registration of a name
//! replaces an earlier one, so a directory can shadow a built-in and a
//! later directory can shadow an earlier one.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::checker::Checker;
use super::external::ExternalChecker;
use crate::checks;

/// Prefix every checker name carries
pub const CHECKER_PREFIX: &str = "check_";

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Checker not found: {0}")]
    NotFound(String),
}

/// Where a checker comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginOrigin {
    /// Compiled into Gator
    Builtin,

    /// An executable in a checker directory
    File(PathBuf),
}

/// Information about a discovered checker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    /// Checker name, including the prefix
    pub name: String,

    /// Where the checker comes from
    pub origin: PluginOrigin,
}

/// Registry of discovered checkers
#[derive(Debug, Clone, Default)]
pub struct PluginSource {
    plugins: BTreeMap<String, PluginInfo>,
}

impl PluginSource {
    /// Creates an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source holding only the built-in checks
    pub fn builtin() -> Self {
        let mut source = Self::new();
        source.add_builtins();
        source
    }

    /// Registers the built-in checks
    pub fn add_builtins(&mut self) {
        for name in checks::names() {
            self.insert(PluginInfo {
                name: name.to_string(),
                origin: PluginOrigin::Builtin,
            });
        }
    }

    fn insert(&mut self, info: PluginInfo) {
        if let Some(previous) = self.plugins.get(&info.name) {
            tracing::debug!(name = %info.name, previous = ?previous.origin, "checker shadowed");
        }
        self.plugins.insert(info.name.clone(), info);
    }

    /// Scans a directory for checkers. A missing or unreadable directory
    /// contributes nothing.
    pub fn scan_directory(&mut self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "skipping checker directory");
                return;
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        for path in paths {
            let is_checker = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(CHECKER_PREFIX));
            let name = path.file_stem().and_then(|n| n.to_str()).map(str::to_string);

            if let (true, Some(name)) = (is_checker, name) {
                tracing::debug!(name = %name, path = %path.display(), "discovered checker");
                self.insert(PluginInfo {
                    name,
                    origin: PluginOrigin::File(path),
                });
            }
        }
    }

    /// Scans each directory in the given order
    pub fn with_directories<P: AsRef<Path>>(mut self, dirs: &[P]) -> Self {
        for dir in dirs {
            self.scan_directory(dir.as_ref());
        }
        self
    }

    /// Names of all discovered checkers, sorted
    pub fn list_plugins(&self) -> Vec<String> {
        self.plugins.keys().cloned().collect()
    }

    /// All discovered checkers, sorted by name
    pub fn list(&self) -> Vec<&PluginInfo> {
        self.plugins.values().collect()
    }

    /// Gets a checker by name
    pub fn get(&self, name: &str) -> Option<&PluginInfo> {
        self.plugins.get(name)
    }

    /// Loads a checker by name
    pub fn load_plugin(&self, name: &str) -> Result<Box<dyn Checker>, LoaderError> {
        let info = self
            .plugins
            .get(name)
            .ok_or_else(|| LoaderError::NotFound(name.to_string()))?;

        tracing::debug!(name, origin = ?info.origin, "loading checker");
        match &info.origin {
            PluginOrigin::Builtin => {
                checks::load(name).ok_or_else(|| LoaderError::NotFound(name.to_string()))
            }
            PluginOrigin::File(path) => Ok(Box::new(ExternalChecker::new(name, path))),
        }
    }
}

/// Discovers the checkers in the given directories, in order
pub fn get_source<P: AsRef<Path>>(dirs: &[P]) -> PluginSource {
    PluginSource::new().with_directories(dirs)
}

/// Adds the checker prefix to a name given without it
pub fn resolve_name(name: &str) -> String {
    if name.starts_with(CHECKER_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", CHECKER_PREFIX, name)
    }
}

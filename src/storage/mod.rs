//! # Storage Layer
//!
//! Filesystem access for Gator: the paths of checked files and the
//! configuration files.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Project config | TOML | `./gator.toml` |
//! | Global config | TOML | `~/.config/gator/config.toml` |
//! | External checkers | executables named `check_*` | checker directories |

mod config;
mod paths;

pub use config::{
    Config, ConfigError, ConfigFile, OutputFormat, CHECKER_DIR_ENV, FALLBACK_CHECKER_DIR,
    PROJECT_CONFIG_FILE,
};
pub use paths::{check_file_in_directory, create_path, path_anchor};

//! # Command-Line Interface
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `gator <CHECK> [ARGS]...` | Run a checker; `CHECK` may omit the `check_` prefix |
//! | `gator list` | List built-in and discovered checkers |
//!
//! Host flags (`--checkerdir`, `--format`, `--verbose`) come before the
//! check name. Everything after it belongs to the checker.
//!
//! ## Exit Codes
//!
//! - `0` - the check ran, whatever its outcome
//! - `1` - unknown checker or a checker that failed to run
//! - `2` - malformed arguments; the usage goes to stderr
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod list_cmd;
mod output;
mod runner;

pub use app::run;
pub use output::Output;
pub use runner::{CheckRunner, RunError};

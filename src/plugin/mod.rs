//! # Plugin System
//!
//! Discovery, argument contracts and execution of checkers.
//!
//! ## Checker Sources
//!
//! | Source | Name Pattern | Runs As |
//! |--------|--------------|---------|
//! | Built-in | `check_{Name}` | [`Checker`] compiled into Gator |
//! | Checker directory | `check_{Name}[.ext]` | Separate process via JSON |
//!
//! ## Protocol
//!
//! ```text
//! Gator                        Checker Executable
//!  │                               │
//!  ├── Spawn: check_WordCount.py   │
//!  │                               │
//!  ├── Stdin: {"operation": "act", "params": {"arguments": [...]}}
//!  │                               │
//!  └── Stdout: {"success": true, "data": {"check": ..., "outcome": ..., "diagnostic": ...}}
//! ```
//!
//! ## Argument Contracts
//!
//! The host parses only `--checkerdir`, `--format`, `--verbose` and the
//! check name ([`HostArgs`]). The rest goes verbatim to the checker,
//! which parses it with its own [`Parser`].
//!
//! ## Key Types
//!
//! - [`PluginSource`] - Discovers and loads checkers
//! - [`Checker`] - Contract of a single check
//! - [`Parser`] / [`ArgumentSpec`] - Per-check argument contracts

mod arguments;
mod checker;
mod external;
mod host;
mod loader;
mod protocol;

pub use arguments::{get_parser, ArgKind, ArgumentSpec, ParsedArgs, Parser, UsageError};
pub use checker::{CheckError, Checker};
pub use external::ExternalChecker;
pub use host::{get_checker_dir, parse, verify, HostArgs, HostCommand};
pub use loader::{get_source, resolve_name, LoaderError, PluginInfo, PluginOrigin, PluginSource, CHECKER_PREFIX};
pub use protocol::{PluginRequest, PluginResponse, ProtocolError};

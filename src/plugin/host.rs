//! The host's argument contract
//!
//! The host knows only its own flags and the check name. Its flags are
//! taken from anywhere on the command line, before or after the check
//! name. Everything else after the check name is handed to the check
//! verbatim and in order. A `--` after the check name ends the host's
//! search.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use super::arguments::UsageError;
use crate::storage::{Config, OutputFormat};

/// Command-line arguments of the host
#[derive(Debug, Clone, Parser)]
#[command(name = "gator")]
#[command(author, version, about = "Check the files and content of a project with pluggable checkers")]
#[command(subcommand_required = true, args_override_self = true)]
pub struct HostArgs {
    /// Directory containing additional checkers
    #[arg(long, value_name = "DIR")]
    pub checkerdir: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: HostCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum HostCommand {
    /// List the available checkers
    List,

    // `<CHECK> [ARGS]...`, kept verbatim
    #[command(external_subcommand)]
    Check(Vec<String>),
}

impl HostArgs {
    /// Name of the requested check, as given
    pub fn check_name(&self) -> Option<&str> {
        match &self.command {
            HostCommand::Check(args) => args.first().map(String::as_str),
            HostCommand::List => None,
        }
    }

    /// Arguments following the check name
    pub fn remaining(&self) -> &[String] {
        match &self.command {
            HostCommand::Check(args) if !args.is_empty() => &args[1..],
            _ => &[],
        }
    }

    /// The checker directory: `--checkerdir` verbatim, otherwise the
    /// configured default
    pub fn checker_dir(&self, config: &Config) -> PathBuf {
        self.checkerdir
            .clone()
            .unwrap_or_else(|| config.default_checker_dir())
    }
}

/// Host flags followed by a value
const VALUE_FLAGS: &[&str] = &["--checkerdir", "--format", "-f"];

/// Host flags without a value
const SWITCHES: &[&str] = &["--verbose", "-v"];

/// How a token after the check name is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Separator,
    ValueFlag,
    HostFlag,
    Other,
}

fn classify(token: &OsStr) -> Token {
    let Some(token) = token.to_str() else {
        return Token::Other;
    };
    let inline_value = VALUE_FLAGS
        .iter()
        .filter(|flag| flag.starts_with("--"))
        .any(|flag| token.strip_prefix(flag).is_some_and(|rest| rest.starts_with('=')));

    if token == "--" {
        Token::Separator
    } else if VALUE_FLAGS.contains(&token) {
        Token::ValueFlag
    } else if SWITCHES.contains(&token) || inline_value {
        Token::HostFlag
    } else {
        Token::Other
    }
}

fn is_flag(token: &OsStr) -> bool {
    token.to_str().is_some_and(|t| t.starts_with('-'))
}

/// Moves host flags given after the command name in front of it. Every
/// other token keeps its original order.
fn hoist_host_flags(raw: Vec<OsString>) -> Vec<OsString> {
    let mut tokens = raw.into_iter();
    let mut argv = Vec::new();
    let mut command = None;

    while let Some(token) = tokens.next() {
        if !is_flag(&token) {
            command = Some(token);
            break;
        }
        let takes_value = classify(&token) == Token::ValueFlag;
        argv.push(token);
        if takes_value {
            argv.extend(tokens.next());
        }
    }

    let mut rest = Vec::new();
    while let Some(token) = tokens.next() {
        match classify(&token) {
            Token::Separator => {
                rest.push(token);
                rest.extend(tokens.by_ref());
            }
            Token::ValueFlag => {
                argv.push(token);
                argv.extend(tokens.next());
            }
            Token::HostFlag => argv.push(token),
            Token::Other => rest.push(token),
        }
    }

    argv.extend(command);
    argv.extend(rest);
    argv
}

/// Parses the host arguments, returning them with the arguments left for
/// the check
pub fn parse<I, T>(raw: I) -> Result<(HostArgs, Vec<String>), UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let raw: Vec<OsString> = raw.into_iter().map(Into::into).collect();
    let argv = std::iter::once(OsString::from("gator")).chain(hoist_host_flags(raw));
    let args = HostArgs::try_parse_from(argv)
        .map_err(|e| UsageError::new(e, HostArgs::command().render_usage().to_string()))?;
    let remaining = args.remaining().to_vec();

    Ok((args, remaining))
}

/// Checks what parsing cannot: a given checker directory must exist and
/// the check name must not be blank
pub fn verify(args: &HostArgs) -> bool {
    if let Some(dir) = &args.checkerdir {
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "checker directory does not exist");
            return false;
        }
    }

    match &args.command {
        HostCommand::Check(_) => args.check_name().is_some_and(|name| !name.trim().is_empty()),
        HostCommand::List => true,
    }
}

/// Returns the checker directory named by the host arguments
pub fn get_checker_dir(args: &HostArgs) -> PathBuf {
    args.checker_dir(&Config::default())
}

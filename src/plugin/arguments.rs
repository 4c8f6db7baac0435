//! Argument contracts for checks
//!
//! Every check declares its own flags as a list of [`ArgumentSpec`]s.
//! [`get_parser`] turns the list into a clap command, and parsing either
//! yields complete [`ParsedArgs`] or a [`UsageError`] carrying the usage
//! message. Deciding whether to exit is left to the caller.

use std::ffi::OsString;

use anyhow::{anyhow, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use thiserror::Error;

/// Value type of a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Any string value
    Text,

    /// A non-negative integer value
    Count,

    /// A switch taking no value
    Flag,
}

/// Declaration of one `--name` flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: ArgKind,
    pub default: Option<&'static str>,
    pub help: &'static str,
}

impl ArgumentSpec {
    /// A required text flag
    pub const fn text(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            required: true,
            kind: ArgKind::Text,
            default: None,
            help,
        }
    }

    /// A required count flag
    pub const fn count(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            required: true,
            kind: ArgKind::Count,
            default: None,
            help,
        }
    }

    /// An optional switch
    pub const fn flag(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            required: false,
            kind: ArgKind::Flag,
            default: None,
            help,
        }
    }

    /// Makes the flag optional
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Makes the flag optional with a default value
    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.required = false;
        self.default = Some(default);
        self
    }

    fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.name).long(self.name).help(self.help);
        let arg = match self.kind {
            ArgKind::Text => arg
                .value_name(self.name.to_uppercase())
                .value_parser(clap::value_parser!(String))
                .action(ArgAction::Set),
            ArgKind::Count => arg
                .value_name(self.name.to_uppercase())
                .value_parser(clap::value_parser!(u64))
                .action(ArgAction::Set),
            ArgKind::Flag => arg.action(ArgAction::SetTrue),
        };
        let arg = arg.required(self.required && self.default.is_none());

        match self.default {
            Some(default) if self.kind != ArgKind::Flag => arg.default_value(default),
            _ => arg,
        }
    }
}

/// Malformed arguments: a missing required flag, an unknown flag, a
/// missing value or a value of the wrong type
#[derive(Debug, Error)]
#[error("{source}")]
pub struct UsageError {
    source: clap::Error,
    usage: String,
}

impl UsageError {
    pub fn new(source: clap::Error, usage: impl Into<String>) -> Self {
        Self {
            source,
            usage: usage.into(),
        }
    }

    /// Rendered message, always including the usage line
    pub fn message(&self) -> String {
        let rendered = self.source.render().to_string();
        if rendered.contains("Usage:") || self.is_help() {
            rendered
        } else {
            format!("{}\n{}\n", rendered.trim_end(), self.usage)
        }
    }

    /// True for `--help`, which is reported through the same channel
    pub fn is_help(&self) -> bool {
        matches!(
            self.source.kind(),
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
        )
    }

    /// Exit code the command line should terminate with
    pub fn exit_code(&self) -> i32 {
        self.source.exit_code()
    }

    /// Prints the message and exits the process. Help goes to stdout,
    /// everything else to stderr only.
    pub fn exit(&self) -> ! {
        if self.is_help() {
            self.source.exit()
        }
        eprint!("{}", self.message());
        std::process::exit(self.exit_code())
    }
}

/// Parser for one argument contract
#[derive(Debug, Clone)]
pub struct Parser {
    name: String,

    /// Declared flags; `None` keeps every argument verbatim
    command: Option<Command>,
}

/// Builds the parser for a check from its flag declarations
pub fn get_parser(name: impl Into<String>, specs: &[ArgumentSpec]) -> Parser {
    let name = name.into();
    let command = specs
        .iter()
        .fold(Command::new(name.clone()).no_binary_name(true), |command, spec| {
            command.arg(spec.to_arg())
        });

    Parser {
        name,
        command: Some(command),
    }
}

impl Parser {
    /// A parser that accepts any arguments and keeps them verbatim, for
    /// checks that validate their own flags
    pub fn passthrough(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: None,
        }
    }

    /// Name shown in the usage line
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parses the raw arguments. Nothing is returned on failure.
    pub fn parse<I, T>(&self, raw: I) -> Result<ParsedArgs, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match &self.command {
            Some(command) => {
                let matches = command
                    .clone()
                    .try_get_matches_from(raw)
                    .map_err(|e| UsageError::new(e, self.usage()))?;
                Ok(ParsedArgs {
                    matches: Some(matches),
                    rest: Vec::new(),
                })
            }
            None => Ok(ParsedArgs {
                matches: None,
                rest: raw
                    .into_iter()
                    .map(|arg| arg.into().to_string_lossy().into_owned())
                    .collect(),
            }),
        }
    }

    /// One-line usage of this parser
    pub fn usage(&self) -> String {
        match &self.command {
            Some(command) => command.clone().render_usage().to_string(),
            None => format!("Usage: {} [ARGUMENTS]...", self.name),
        }
    }
}

/// Arguments accepted by a [`Parser`]
#[derive(Debug, Clone)]
pub struct ParsedArgs {
    matches: Option<ArgMatches>,
    rest: Vec<String>,
}

impl ParsedArgs {
    /// Value of a text flag, if given or defaulted
    pub fn text(&self, name: &str) -> Option<&str> {
        self.matches
            .as_ref()?
            .try_get_one::<String>(name)
            .ok()
            .flatten()
            .map(String::as_str)
    }

    /// Value of a count flag, if given or defaulted
    pub fn count(&self, name: &str) -> Option<u64> {
        self.matches
            .as_ref()?
            .try_get_one::<u64>(name)
            .ok()
            .flatten()
            .copied()
    }

    /// Whether a switch was given
    pub fn flag(&self, name: &str) -> bool {
        self.matches
            .as_ref()
            .and_then(|m| m.try_get_one::<bool>(name).ok().flatten().copied())
            .unwrap_or(false)
    }

    /// Value of a text flag that the contract declares required
    pub fn required_text(&self, name: &str) -> Result<&str> {
        self.text(name)
            .ok_or_else(|| anyhow!("Missing value for --{}", name))
    }

    /// Value of a count flag that the contract declares required
    pub fn required_count(&self, name: &str) -> Result<u64> {
        self.count(name)
            .ok_or_else(|| anyhow!("Missing value for --{}", name))
    }

    /// Arguments kept verbatim by a pass-through parser
    pub fn passthrough(&self) -> &[String] {
        &self.rest
    }
}

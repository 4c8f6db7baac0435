//! The contract every checker implements

use thiserror::Error;

use super::arguments::{ParsedArgs, Parser, UsageError};
use super::host::HostArgs;
use super::protocol::ProtocolError;
use crate::domain::Report;

/// Why a checker could not produce a result
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("Invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    #[error("Failed to run checker {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Checker {name} failed: {source}")]
    Protocol {
        name: String,
        #[source]
        source: ProtocolError,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A check that inspects files and reports whether a requirement is met
pub trait Checker {
    /// Plugin name, including the `check_` prefix
    fn name(&self) -> &str;

    /// Parser for this check's own flags
    fn get_parser(&self) -> Parser;

    /// Parses the check's arguments with `parser`, or with
    /// [`Checker::get_parser`] when none is given
    fn parse(&self, remaining: &[String], parser: Option<&Parser>) -> Result<ParsedArgs, UsageError> {
        match parser {
            Some(parser) => parser.parse(remaining),
            None => self.get_parser().parse(remaining),
        }
    }

    /// Runs the check. Writes exactly one result to `report` and returns
    /// the outcome of every requirement checked.
    fn act(&self, host: &HostArgs, remaining: &[String], report: &mut Report) -> Result<Vec<bool>, CheckError>;
}

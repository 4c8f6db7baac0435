//! Counts the matches of a regular expression in a file

use crate::domain::{count_phrase, regex_greater_than_count, CheckResult, Report};
use crate::plugin::{get_parser, ArgumentSpec, CheckError, Checker, HostArgs, Parser};

pub const NAME: &str = "check_MatchFileRegex";

const ARGUMENTS: &[ArgumentSpec] = &[
    ArgumentSpec::text("file", "file for checking"),
    ArgumentSpec::text("directory", "directory with file for checking"),
    ArgumentSpec::count("count", "how many regex matches should exist"),
    ArgumentSpec::text("regex", "regular expression that matches file contents"),
    ArgumentSpec::flag("exact", "equals instead of a minimum number"),
];

/// Requires a minimum (or exact) number of regex matches in a file
#[derive(Debug, Default)]
pub struct MatchFileRegex;

impl Checker for MatchFileRegex {
    fn name(&self) -> &str {
        NAME
    }

    fn get_parser(&self) -> Parser {
        get_parser(NAME, ARGUMENTS)
    }

    fn act(&self, _host: &HostArgs, remaining: &[String], report: &mut Report) -> Result<Vec<bool>, CheckError> {
        let args = self.parse(remaining, None)?;
        let file = args.required_text("file")?;
        let directory = args.required_text("directory")?;
        let count = args.required_count("count")?;
        let regex = args.required_text("regex")?;
        let exact = args.flag("exact");

        let expected = usize::try_from(count).unwrap_or(usize::MAX);
        let (met, found) = regex_greater_than_count(regex, expected, file, directory, exact)?;

        let check = format!(
            "The {} in {} has {} match(es) of the regular expression {}",
            file,
            directory,
            count_phrase(count, exact),
            regex
        );
        let diagnostic = format!(
            "Found {} match(es) of the regular expression in {}",
            found, file
        );

        report.set_result(CheckResult::from_outcome(check, met, diagnostic));
        Ok(vec![met])
    }
}

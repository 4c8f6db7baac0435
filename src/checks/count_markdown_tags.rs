//! Counts a markdown tag in a file

use crate::domain::{count_phrase, count_specified_tag, specified_tag_greater_than_count, CheckResult, Report};
use crate::plugin::{get_parser, ArgumentSpec, CheckError, Checker, HostArgs, Parser};

pub const NAME: &str = "check_CountMarkdownTags";

const ARGUMENTS: &[ArgumentSpec] = &[
    ArgumentSpec::text("file", "file for checking"),
    ArgumentSpec::text("directory", "directory with file for checking"),
    ArgumentSpec::count("count", "how many tags should exist"),
    ArgumentSpec::text("tag", "markdown tag that exists in the file"),
    ArgumentSpec::flag("exact", "equals instead of a minimum number"),
];

/// Requires a minimum (or exact) count of a markdown tag in a file
#[derive(Debug, Default)]
pub struct CountMarkdownTags;

impl Checker for CountMarkdownTags {
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
        let tag = args.required_text("tag")?;
        let exact = args.flag("exact");

        let expected = i64::try_from(count).unwrap_or(i64::MAX);
        let (met, found) =
            specified_tag_greater_than_count(tag, count_specified_tag, expected, file, directory, exact);

        let check = format!(
            "The {} in {} has {} of the '{}' tag",
            file,
            directory,
            count_phrase(count, exact),
            tag
        );
        let diagnostic = format!("Found {} tag(s) in the {} file", found, file);

        report.set_result(CheckResult::from_outcome(check, met, diagnostic));
        Ok(vec![met])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::parse;
    use std::fs;
    use tempfile::TempDir;

    fn act(directory: &str, count: &str, exact: bool) -> (Vec<bool>, Report) {
        let (host, _) = parse(["CountMarkdownTags"]).unwrap();
        let mut remaining: Vec<String> = [
            "--file", "README.md", "--directory", directory, "--count", count, "--tag", "heading",
        ]
        .iter()
        .map(|a| a.to_string())
        .collect();
        if exact {
            remaining.push("--exact".to_string());
        }

        let mut report = Report::new();
        let outcomes = CountMarkdownTags.act(&host, &remaining, &mut report).unwrap();
        (outcomes, report)
    }

    #[test]
    fn zero_count_passes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "# One\n\n## Two\n").unwrap();

        let (outcomes, report) = act(dir.path().to_str().unwrap(), "0", true);
        assert_eq!(outcomes, vec![true]);
        assert_eq!(report.get_result().unwrap().diagnostic, "");
    }

    #[test]
    fn positive_count_uses_net_nesting() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "# One\n\n## Two\n").unwrap();

        let (outcomes, report) = act(dir.path().to_str().unwrap(), "2", false);
        assert_eq!(outcomes, vec![false]);

        let result = report.get_result().unwrap();
        assert!(result.check.contains("at least 2"));
        assert_eq!(result.diagnostic, "Found 0 tag(s) in the README.md file");
    }

    #[test]
    fn missing_tag_flag_is_a_usage_error() {
        let remaining: Vec<String> = ["--file", "f", "--directory", "d", "--count", "1"]
            .iter()
            .map(|a| a.to_string())
            .collect();
        let (host, _) = parse(["CountMarkdownTags"]).unwrap();
        let mut report = Report::new();

        let err = CountMarkdownTags.act(&host, &remaining, &mut report).unwrap_err();
        assert!(matches!(err, CheckError::Usage(_)));
        assert!(report.get_result().is_none());
    }
}

//! Confirms that a file exists

use std::path::{Path, PathBuf};

use crate::domain::{CheckResult, Report};
use crate::plugin::{get_parser, ArgumentSpec, CheckError, Checker, HostArgs, Parser};
use crate::storage::{check_file_in_directory, path_anchor};

pub const NAME: &str = "check_ConfirmFileExists";

const ARGUMENTS: &[ArgumentSpec] = &[
    ArgumentSpec::text("file", "file for checking"),
    ArgumentSpec::text("directory", "directory with file for checking"),
    ArgumentSpec::text("home", "directory the checked directory is relative to").optional(),
];

/// Requires a regular file to exist in a directory
#[derive(Debug, Default)]
pub struct ConfirmFileExists;

impl Checker for ConfirmFileExists {
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

        // without --home the directory keeps its own root
        let home = args
            .text("home")
            .map(PathBuf::from)
            .unwrap_or_else(|| path_anchor(Path::new(directory)));

        let met = check_file_in_directory(&[directory], file, &home);
        let check = format!("The file {} exists in the {} directory", file, directory);
        let diagnostic = format!("Did not find the specified file in the {} directory", directory);

        report.set_result(CheckResult::from_outcome(check, met, diagnostic));
        Ok(vec![met])
    }
}

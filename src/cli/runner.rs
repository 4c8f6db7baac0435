//! Running a check end to end
//!
//! The runner resolves the check name from the host arguments, loads the
//! checker, and lends it the report for its single write.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::Report;
use crate::plugin::{resolve_name, CheckError, Checker, HostArgs, LoaderError, PluginSource};
use crate::storage::Config;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("No check was requested")]
    NoCheck,

    #[error(transparent)]
    NotFound(#[from] LoaderError),

    #[error(transparent)]
    Check(#[from] CheckError),

    #[error("Checker {0} finished without writing a report")]
    NoReport(String),
}

/// Runs checks from one plugin source, one at a time
pub struct CheckRunner {
    source: PluginSource,
}

impl CheckRunner {
    pub fn new(source: PluginSource) -> Self {
        Self { source }
    }

    /// Builds the source the host uses: the built-in checks, then the
    /// configured directories, then the checker directory
    pub fn for_host(host: &HostArgs, config: &Config) -> Self {
        let mut dirs: Vec<PathBuf> = config.checker_dirs.clone();
        dirs.push(host.checker_dir(config));

        Self::new(PluginSource::builtin().with_directories(&dirs))
    }

    /// The checkers this runner can run
    pub fn source(&self) -> &PluginSource {
        &self.source
    }

    /// Runs the check named in the host arguments with the remaining
    /// arguments. The report holds exactly the check's result afterwards.
    pub fn run(&self, host: &HostArgs, report: &mut Report) -> Result<Vec<bool>, RunError> {
        let name = resolve_name(host.check_name().ok_or(RunError::NoCheck)?);
        let checker = self.source.load_plugin(&name)?;

        Self::run_checker(checker.as_ref(), host, report)
    }

    /// Runs an already loaded checker
    pub fn run_checker(checker: &dyn Checker, host: &HostArgs, report: &mut Report) -> Result<Vec<bool>, RunError> {
        report.clear();
        let outcomes = checker.act(host, host.remaining(), report)?;

        if report.get_result().is_none() {
            return Err(RunError::NoReport(checker.name().to_string()));
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CheckResult;
    use crate::plugin::{get_source, parse, Parser};
    use std::fs;
    use tempfile::TempDir;

    struct Silent;

    impl Checker for Silent {
        fn name(&self) -> &str {
            "check_Silent"
        }

        fn get_parser(&self) -> Parser {
            Parser::passthrough("check_Silent")
        }

        fn act(&self, _host: &HostArgs, _remaining: &[String], _report: &mut Report) -> Result<Vec<bool>, CheckError> {
            Ok(vec![true])
        }
    }

    #[test]
    fn runs_builtin_without_prefix() {
        let dir = TempDir::new().unwrap();
        let containing = dir.path().join("containing_directory");
        fs::create_dir_all(&containing).unwrap();
        fs::write(containing.join("file_to_find"), "\\begin{document} hello! \\end{document}").unwrap();

        let (host, _) = parse([
            "MatchFileRegex",
            "--file",
            "file_to_find",
            "--directory",
            containing.to_str().unwrap(),
            "--count",
            "1",
            "--regex",
            "(hel)*",
        ])
        .unwrap();

        let runner = CheckRunner::new(PluginSource::builtin());
        let mut report = Report::new();
        report.set_result(CheckResult::failed("stale", "from an earlier run"));

        let outcomes = runner.run(&host, &mut report).unwrap();
        assert_eq!(outcomes.len(), 1);

        let result = report.get_result().unwrap();
        assert!(result.outcome);
        assert_eq!(result.diagnostic, "");
    }

    #[test]
    fn unknown_check_is_not_found() {
        let (host, _) = parse(["NoSuchCheck"]).unwrap();
        let runner = CheckRunner::new(PluginSource::builtin());
        let mut report = Report::new();

        assert!(matches!(
            runner.run(&host, &mut report),
            Err(RunError::NotFound(LoaderError::NotFound(name))) if name == "check_NoSuchCheck"
        ));
    }

    #[test]
    fn usage_errors_surface_from_act() {
        let (host, _) = parse(["MatchFileRegex", "--file"]).unwrap();
        let runner = CheckRunner::new(PluginSource::builtin());
        let mut report = Report::new();

        assert!(matches!(
            runner.run(&host, &mut report),
            Err(RunError::Check(CheckError::Usage(_)))
        ));
        assert!(report.get_result().is_none());
    }

    #[test]
    fn silent_checker_is_detected() {
        let (host, _) = parse(["Silent"]).unwrap();
        let mut report = Report::new();
        report.set_result(CheckResult::passed("stale"));

        assert!(matches!(
            CheckRunner::run_checker(&Silent, &host, &mut report),
            Err(RunError::NoReport(name)) if name == "check_Silent"
        ));
        assert!(report.get_result().is_none());
    }

    #[test]
    fn listed_directory_checkers_load() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("check_testing.py"), "a checker").unwrap();

        let source = get_source(&[dir.path()]);
        for name in source.list_plugins() {
            assert!(source.load_plugin(&name).is_ok());
        }
    }

    #[test]
    fn host_source_includes_builtins_and_checker_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("check_Custom.sh"), "").unwrap();
        let (host, _) = parse([
            std::ffi::OsString::from("--checkerdir"),
            dir.path().as_os_str().to_os_string(),
            std::ffi::OsString::from("Custom"),
        ])
        .unwrap();

        let runner = CheckRunner::for_host(&host, &Config::default());
        let names = runner.source().list_plugins();
        assert!(names.contains(&"check_Custom".to_string()));
        assert!(names.contains(&"check_MatchFileRegex".to_string()));
    }
}

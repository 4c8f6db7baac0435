//! Check results and the report they are written to
//!
//! A [`Report`] is owned by whoever runs a check and is lent to the
//! check's `act` for exactly one write. It is not shared between threads:
//! running checks in parallel would need one report per check, or
//! exclusion around every write.

use serde::{Deserialize, Serialize};

/// Diagnostic used when a failing check supplies no text of its own
const GENERIC_DIAGNOSTIC: &str = "The check did not pass";

/// Outcome of one check invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Description of the requirement that was checked
    pub check: String,

    /// Whether the requirement was met
    pub outcome: bool,

    /// Why the requirement was not met; empty when it was
    #[serde(default)]
    pub diagnostic: String,
}

impl CheckResult {
    /// A passing result, always with an empty diagnostic
    pub fn passed(check: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            outcome: true,
            diagnostic: String::new(),
        }
    }

    /// A failing result, always with a non-empty diagnostic
    pub fn failed(check: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        let diagnostic = diagnostic.into();
        Self {
            check: check.into(),
            outcome: false,
            diagnostic: if diagnostic.trim().is_empty() {
                GENERIC_DIAGNOSTIC.to_string()
            } else {
                diagnostic
            },
        }
    }

    /// Builds a result from an outcome, dropping the diagnostic on success
    pub fn from_outcome(
        check: impl Into<String>,
        outcome: bool,
        diagnostic: impl Into<String>,
    ) -> Self {
        if outcome {
            Self::passed(check)
        } else {
            Self::failed(check, diagnostic)
        }
    }
}

/// The result of the most recently run check
#[derive(Debug, Default)]
pub struct Report {
    result: Option<CheckResult>,
}

impl Report {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent result, or `None` before any check has run
    pub fn get_result(&self) -> Option<&CheckResult> {
        self.result.as_ref()
    }

    /// Records a result, replacing any previous one
    pub fn set_result(&mut self, result: CheckResult) {
        tracing::debug!(check = %result.check, outcome = result.outcome, "report written");
        self.result = Some(result);
    }

    /// Forgets the current result
    pub fn clear(&mut self) {
        self.result = None;
    }

    /// Takes the current result out of the report
    pub fn take(&mut self) -> Option<CheckResult> {
        self.result.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_has_no_result() {
        let report = Report::new();
        assert!(report.get_result().is_none());
    }

    #[test]
    fn passed_has_empty_diagnostic() {
        let result = CheckResult::passed("The file exists");
        assert!(result.outcome);
        assert_eq!(result.diagnostic, "");
    }

    #[test]
    fn failed_never_has_empty_diagnostic() {
        let result = CheckResult::failed("The file exists", "  ");
        assert!(!result.outcome);
        assert_eq!(result.diagnostic, GENERIC_DIAGNOSTIC);

        let result = CheckResult::failed("The file exists", "Did not find it");
        assert_eq!(result.diagnostic, "Did not find it");
    }

    #[test]
    fn from_outcome_drops_diagnostic_on_success() {
        let result = CheckResult::from_outcome("Check", true, "ignored");
        assert_eq!(result, CheckResult::passed("Check"));
    }

    #[test]
    fn set_result_overwrites() {
        let mut report = Report::new();
        report.set_result(CheckResult::passed("first"));
        report.set_result(CheckResult::failed("second", "nope"));

        let result = report.get_result().unwrap();
        assert_eq!(result.check, "second");
        assert!(!result.outcome);
    }

    #[test]
    fn clear_and_take() {
        let mut report = Report::new();
        report.set_result(CheckResult::passed("first"));
        assert_eq!(report.take().unwrap().check, "first");
        assert!(report.get_result().is_none());

        report.set_result(CheckResult::passed("again"));
        report.clear();
        assert!(report.get_result().is_none());
    }

    #[test]
    fn result_serialization() {
        let json = serde_json::to_value(CheckResult::failed("c", "d")).unwrap();
        assert_eq!(json["check"], "c");
        assert_eq!(json["outcome"], false);
        assert_eq!(json["diagnostic"], "d");
    }
}

//! External checker protocol types
//!
//! External checkers communicate via JSON messages over stdin/stdout:
//! one request line in, one response line out.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::CheckResult;

/// Operation asking a checker to run
pub const ACT: &str = "act";

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Checker reported an error: {0}")]
    Reported(String),

    #[error("Checker response carries no result")]
    MissingData,

    #[error("Checker result is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Checker result has an empty check description")]
    EmptyCheck,

    #[error("Checker exited with {0}")]
    Exited(std::process::ExitStatus),
}

/// A message sent to a checker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginRequest {
    /// The operation to perform
    pub operation: String,

    /// Operation-specific parameters
    pub params: serde_json::Value,
}

impl PluginRequest {
    pub fn new(operation: impl Into<String>, params: impl Into<serde_json::Value>) -> Self {
        Self {
            operation: operation.into(),
            params: params.into(),
        }
    }

    /// Asks the checker to run with its own arguments, in order
    pub fn act(arguments: &[String]) -> Self {
        Self::new(ACT, serde_json::json!({ "arguments": arguments }))
    }
}

/// A response from a checker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginResponse {
    /// Whether the operation succeeded
    pub success: bool,

    /// Result data (if success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Error message (if failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PluginResponse {
    pub fn success(data: impl Into<serde_json::Value>) -> Self {
        Self {
            success: true,
            data: Some(data.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Extracts the check result of an `act` response. The diagnostic
    /// rule is re-applied, so a passing result never carries one.
    pub fn into_check_result(self) -> Result<CheckResult, ProtocolError> {
        if !self.success {
            return Err(ProtocolError::Reported(
                self.error.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }

        let data = self.data.ok_or(ProtocolError::MissingData)?;
        let result: CheckResult = serde_json::from_value(data)?;
        if result.check.trim().is_empty() {
            return Err(ProtocolError::EmptyCheck);
        }

        Ok(CheckResult::from_outcome(
            result.check,
            result.outcome,
            result.diagnostic,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn act_request_serialization() {
        let request = PluginRequest::act(&["--file".to_string(), "a b".to_string()]);
        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains("\"operation\":\"act\""));
        assert!(json.contains("[\"--file\",\"a b\"]"));
    }

    #[test]
    fn response_success() {
        let response = PluginResponse::success(serde_json::json!({"result": "ok"}));

        assert!(response.success);
        assert!(response.data.is_some());
        assert!(response.error.is_none());
    }

    #[test]
    fn response_error() {
        let response = PluginResponse::error("Something went wrong");

        assert!(!response.success);
        assert!(response.data.is_none());
        assert!(matches!(
            response.into_check_result(),
            Err(ProtocolError::Reported(message)) if message == "Something went wrong"
        ));
    }

    #[test]
    fn check_result_from_response() {
        let response: PluginResponse = serde_json::from_str(
            r#"{"success": true, "data": {"check": "The file has words", "outcome": true, "diagnostic": "stray"}}"#,
        )
        .unwrap();

        let result = response.into_check_result().unwrap();
        assert!(result.outcome);
        assert_eq!(result.diagnostic, "");
    }

    #[test]
    fn failing_result_gets_diagnostic() {
        let response = PluginResponse::success(serde_json::json!({
            "check": "The file has words",
            "outcome": false,
            "diagnostic": "",
        }));

        let result = response.into_check_result().unwrap();
        assert!(!result.outcome);
        assert!(!result.diagnostic.is_empty());
    }

    #[test]
    fn malformed_results_are_rejected() {
        assert!(matches!(
            PluginResponse { success: true, data: None, error: None }.into_check_result(),
            Err(ProtocolError::MissingData)
        ));
        assert!(matches!(
            PluginResponse::success(serde_json::json!({"outcome": "yes"})).into_check_result(),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            PluginResponse::success(serde_json::json!({"check": " ", "outcome": true, "diagnostic": ""}))
                .into_check_result(),
            Err(ProtocolError::EmptyCheck)
        ));
    }
}

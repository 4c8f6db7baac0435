//! Checkers implemented by executables in a checker directory

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use super::arguments::Parser;
use super::checker::{CheckError, Checker};
use super::host::HostArgs;
use super::protocol::{PluginRequest, PluginResponse, ProtocolError};
use crate::domain::Report;

/// A checker run as a separate process
#[derive(Debug, Clone)]
pub struct ExternalChecker {
    name: String,
    path: PathBuf,
}

impl ExternalChecker {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Path to the checker executable
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn spawn_error(&self, source: std::io::Error) -> CheckError {
        CheckError::Spawn {
            name: self.name.clone(),
            source,
        }
    }

    fn protocol_error(&self, source: ProtocolError) -> CheckError {
        CheckError::Protocol {
            name: self.name.clone(),
            source,
        }
    }

    /// Sends one request and reads one response. The process is always
    /// waited on and must exit successfully.
    fn execute(&self, request: &PluginRequest) -> Result<PluginResponse, CheckError> {
        let mut child = Command::new(&self.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let exchanged = self.exchange(&mut child, request);
        drop(child.stdout.take());
        let status = child.wait().map_err(|e| self.spawn_error(e))?;
        let response_line = exchanged?;

        if !status.success() {
            tracing::debug!(checker = %self.name, %status, "external checker failed");
            return Err(self.protocol_error(ProtocolError::Exited(status)));
        }

        serde_json::from_str(&response_line)
            .map_err(|e| self.protocol_error(ProtocolError::Malformed(e)))
    }

    /// Writes the request line and reads the response line
    fn exchange(&self, child: &mut Child, request: &PluginRequest) -> Result<String, CheckError> {
        // Send request; dropping stdin closes it
        {
            let mut stdin = child.stdin.take().ok_or_else(|| {
                self.spawn_error(std::io::Error::other("stdin is not piped"))
            })?;
            let request_json = serde_json::to_string(request)
                .map_err(|e| self.protocol_error(ProtocolError::Malformed(e)))?;
            writeln!(stdin, "{}", request_json).map_err(|e| self.spawn_error(e))?;
        }

        // Read response
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| self.spawn_error(std::io::Error::other("stdout is not piped")))?;
        BufReader::new(stdout)
            .lines()
            .next()
            .ok_or_else(|| {
                self.spawn_error(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "no response from checker",
                ))
            })?
            .map_err(|e| self.spawn_error(e))
    }
}

impl Checker for ExternalChecker {
    fn name(&self) -> &str {
        &self.name
    }

    /// External checkers validate their own flags
    fn get_parser(&self) -> Parser {
        Parser::passthrough(self.name.clone())
    }

    fn act(&self, _host: &HostArgs, remaining: &[String], report: &mut Report) -> Result<Vec<bool>, CheckError> {
        let args = self.parse(remaining, None)?;

        tracing::debug!(checker = %self.name, path = %self.path.display(), "running external checker");
        let response = self.execute(&PluginRequest::act(args.passthrough()))?;
        let result = response
            .into_check_result()
            .map_err(|e| self.protocol_error(e))?;

        let outcome = result.outcome;
        report.set_result(result);
        Ok(vec![outcome])
    }
}

//! Main CLI application structure

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use super::list_cmd;
use super::output::Output;
use super::runner::{CheckRunner, RunError};
use crate::domain::Report;
use crate::plugin::{self, CheckError, HostArgs, HostCommand};
use crate::storage::Config;

/// Installs the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "gator=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let (host, _) = match plugin::parse(std::env::args_os().skip(1)) {
        Ok(parsed) => parsed,
        Err(e) => e.exit(),
    };

    init_logging(host.verbose);
    let config = Config::load().context("Failed to load configuration")?;
    let output = Output::new(host.format.unwrap_or(config.default_format), host.verbose);

    output.verbose("Gator starting");

    if !plugin::verify(&host) {
        if let Some(dir) = &host.checkerdir {
            output.warning(&format!("Checker directory does not exist: {}", dir.display()));
        }
    }

    let runner = CheckRunner::for_host(&host, &config);
    output.verbose_ctx(
        "plugins",
        &format!("Discovered {} checker(s)", runner.source().list_plugins().len()),
    );

    match &host.command {
        HostCommand::List => list_cmd::run(&runner, &output),
        HostCommand::Check(_) => run_check(&runner, &host, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Runs the requested check and prints its report
fn run_check(runner: &CheckRunner, host: &HostArgs, output: &Output) -> Result<()> {
    let mut report = Report::new();
    output.verbose_ctx(
        "check",
        &format!("Running {:?} with {:?}", host.check_name(), host.remaining()),
    );

    match runner.run(host, &mut report) {
        Ok(outcomes) => {
            output.verbose_ctx("check", &format!("Outcomes: {:?}", outcomes));
        }
        Err(RunError::Check(CheckError::Usage(e))) => e.exit(),
        Err(RunError::NotFound(e)) => {
            return Err(e).context("Run `gator list` to see the available checkers");
        }
        Err(e) => return Err(e.into()),
    }

    if let Some(result) = report.get_result() {
        output.report(result);
    }

    Ok(())
}

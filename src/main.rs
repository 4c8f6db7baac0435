//! Gator - pluggable file and content checker

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = gator::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

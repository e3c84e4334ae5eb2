//! LAAS command-line application — thin presentation shell.
//!
//! Parses arguments, sets up logging, resolves the vault directory and
//! hands each command to `laas-vault`. All vault semantics live in the
//! library crates; this crate only formats output and maps errors to exit
//! codes.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod paths;
pub mod prompt;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use error::AppError;

/// Run the application with the process arguments and return its exit code.
#[must_use]
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_level.as_deref());

    if let Err(e) = laas_crypto_core::disable_core_dumps() {
        tracing::warn!("could not disable core dumps: {e}");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match commands::dispatch(&cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(err: &AppError) -> ExitCode {
    let _ = std::io::stdout().flush();
    eprintln!("laas: {err}");
    ExitCode::from(err.exit_code())
}

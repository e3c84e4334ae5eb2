//! Command handlers.
//!
//! Each submodule turns one group of subcommands into calls on
//! `laas-vault` and writes human-readable output to the given writer.
//! Handlers take the vault directory explicitly so they can run against a
//! temporary directory in tests.

pub mod entries;
pub mod vault;

use std::io::Write;
use std::path::Path;

use laas_vault::VaultConfig;

use crate::cli::{Cli, Command};
use crate::error::AppError;
use crate::paths;

/// Run the parsed command line.
///
/// # Errors
///
/// Returns whatever the selected handler returns.
pub fn dispatch(cli: &Cli, out: &mut impl Write) -> Result<(), AppError> {
    let vault_dir = paths::resolve_vault_dir(cli.vault_dir.as_deref());
    tracing::debug!(vault_dir = %vault_dir.display(), "resolved vault directory");

    match &cli.command {
        Command::Add(args) => entries::add(&vault_dir, args, out),
        Command::Get { platform } => entries::get(&vault_dir, platform, out),
        Command::Generate => entries::generate(&vault_dir, out),
        Command::List => entries::list(&vault_dir, out),
        Command::Info => vault::info(out),
        Command::DeleteAll { yes } => {
            let stdin = std::io::stdin();
            vault::delete_all(&vault_dir, *yes, &mut stdin.lock(), out)
        }
        Command::Config => vault::show_config(&vault_dir, out),
    }
}

/// Load and validate `{vault_dir}/laas.json`.
fn load_config(vault_dir: &Path) -> Result<VaultConfig, AppError> {
    let config = VaultConfig::load(vault_dir);
    config.validate()?;
    Ok(config)
}

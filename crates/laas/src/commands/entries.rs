//! Entry commands: add, get, generate, list.

use std::io::Write;
use std::path::Path;

use laas_crypto_core::PasswordGenerator;
use laas_vault::{vault_files, VaultError, VaultService, TIMESTAMP_FORMAT};
use secrecy::{ExposeSecret, SecretString};

use super::load_config;
use crate::cli::AddArgs;
use crate::error::AppError;
use crate::prompt;

/// `laas add`: store or replace one entry.
///
/// With `--generate` the new password is printed once, since it exists
/// nowhere else in plaintext.
///
/// # Errors
///
/// Returns [`AppError::Vault`] for validation, key or write failures and
/// [`AppError::Prompt`] if the password cannot be read.
pub fn add(vault_dir: &Path, args: &AddArgs, out: &mut impl Write) -> Result<(), AppError> {
    let config = load_config(vault_dir)?;
    let mut vault = VaultService::open(&config, vault_dir)?;

    let password = if args.generate {
        SecretString::from(vault.generate_password())
    } else if let Some(given) = &args.password {
        SecretString::from(given.clone())
    } else {
        prompt::read_password("Password")?
    };

    vault.add(&args.platform, &args.username, password.expose_secret())?;

    writeln!(out, "Password saved for {}.", args.platform.trim())?;
    if args.generate {
        writeln!(out, "Generated password: {}", password.expose_secret())?;
    }
    Ok(())
}

/// `laas get`: print username and password for one platform.
///
/// # Errors
///
/// Returns [`AppError::Vault`] with `NotFound` on a miss and `Crypto` if the
/// stored password does not decrypt.
pub fn get(vault_dir: &Path, platform: &str, out: &mut impl Write) -> Result<(), AppError> {
    let config = load_config(vault_dir)?;
    let vault = VaultService::open(&config, vault_dir)?;
    let credential = vault.retrieve(platform)?;

    writeln!(out, "Platform: {}", credential.platform)?;
    writeln!(out, "Username: {}", credential.username)?;
    writeln!(out, "Password: {}", credential.password.expose_secret())?;
    if let Some(saved_at) = credential.saved_at {
        writeln!(out, "Saved:    {}", saved_at.format(TIMESTAMP_FORMAT))?;
    }
    Ok(())
}

/// `laas generate`: print a random password without storing it.
///
/// Reads only the configuration; the vault files are not touched.
///
/// # Errors
///
/// Returns [`AppError::Vault`] if the configuration is invalid.
pub fn generate(vault_dir: &Path, out: &mut impl Write) -> Result<(), AppError> {
    let config = load_config(vault_dir)?;
    let generator = PasswordGenerator::new(config.generator).map_err(VaultError::from)?;
    writeln!(out, "{}", generator.generate())?;
    Ok(())
}

/// `laas list`: platform names and their count.
///
/// Reads the data file only, so listing an empty directory does not
/// create a key.
///
/// # Errors
///
/// Returns [`AppError::Vault`] if the data file cannot be read.
pub fn list(vault_dir: &Path, out: &mut impl Write) -> Result<(), AppError> {
    let config = load_config(vault_dir)?;
    let (_, store) = vault_files(&config, vault_dir);
    let records = store.load()?;

    match records.len() {
        0 => writeln!(out, "No passwords stored.")?,
        1 => writeln!(out, "1 platform stored:")?,
        n => writeln!(out, "{n} platforms stored:")?,
    }
    for platform in records.platforms() {
        writeln!(out, "  {platform}")?;
    }
    Ok(())
}

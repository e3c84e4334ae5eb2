//! Vault-wide commands: info, delete-all, config.

use std::io::{BufRead, Write};
use std::path::Path;

use laas_vault::{delete_vault_files, vault_files, VaultConfig};

use crate::error::AppError;
use crate::prompt;

const USER_GUIDE: &str = "\
LAAS - USER GUIDE
=================

LAAS stores your passwords encrypted on this computer.

COMMANDS
--------

1. STORE A PASSWORD
   laas add <platform> <username>
   You are asked for the password (8 to 25 characters). Use --generate to
   store a new random password instead, or --password to pass it directly.
   Saving again for the same platform replaces the old entry.

2. RETRIEVE A PASSWORD
   laas get <platform>
   Shows username and password. Upper and lower case do not matter.

3. GENERATE A PASSWORD
   laas generate
   Prints a random password made of letters, digits and punctuation.

4. LIST PLATFORMS
   laas list
   Shows every stored platform and how many there are.

5. DELETE ALL DATA
   laas delete-all
   Removes the password file and the key file. This cannot be undone.

SECURITY
--------

- Passwords are encrypted with AES-256-GCM before they are written to disk.
- The key is kept in a file next to the data. Anyone who can read both
  files can read your passwords.
- Use a strong, unique password for each platform and change important
  passwords regularly.

NOTE: LAAS is a small personal tool, not a hardened password manager.
";

/// `laas info`: print the user guide.
///
/// # Errors
///
/// Returns [`AppError::Output`] if stdout cannot be written.
pub fn info(out: &mut impl Write) -> Result<(), AppError> {
    out.write_all(USER_GUIDE.as_bytes())?;
    Ok(())
}

/// `laas delete-all`: wipe the data file and the key file.
///
/// Asks for confirmation on `input` unless `yes` is set. The vault is never
/// opened, so a directory without a key does not get one just to be wiped.
///
/// # Errors
///
/// - [`AppError::Aborted`] if the user does not confirm
/// - [`AppError::Vault`] with `NothingToDelete` if neither file exists
pub fn delete_all(
    vault_dir: &Path,
    yes: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let config = VaultConfig::load(vault_dir);
    let (keys, store) = vault_files(&config, vault_dir);

    if !yes && !prompt::confirm("Are you sure you want to delete all data?", input)? {
        return Err(AppError::Aborted);
    }

    delete_vault_files(&keys, &store)?;
    writeln!(out, "All data has been removed.")?;
    Ok(())
}

/// `laas config`: print the vault directory and effective configuration.
///
/// The configuration is printed even when it does not validate, followed
/// by the validation error.
///
/// # Errors
///
/// Returns [`AppError::Vault`] with `Config` if the configuration is invalid.
pub fn show_config(vault_dir: &Path, out: &mut impl Write) -> Result<(), AppError> {
    let config = VaultConfig::load(vault_dir);

    let mut value = serde_json::to_value(&config)?;
    if let Some(map) = value.as_object_mut() {
        map.insert(
            "vaultDir".into(),
            serde_json::Value::String(vault_dir.display().to_string()),
        );
    }
    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;

    config.validate()?;
    Ok(())
}

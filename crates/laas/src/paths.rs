//! Vault directory resolution.

use std::path::{Path, PathBuf};

/// Directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "laas";

/// Pick the vault directory.
///
/// `explicit` carries `--vault-dir` or `LAAS_VAULT_DIR` (clap merges both).
/// Otherwise `{data_dir}/laas`, and the current directory as a last resort.
#[must_use]
pub fn resolve_vault_dir(explicit: Option<&Path>) -> PathBuf {
    resolve_with(explicit, dirs::data_dir())
}

fn resolve_with(explicit: Option<&Path>, data_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    data_dir.map_or_else(|| PathBuf::from("."), |dir| dir.join(APP_DIR_NAME))
}

//! Application errors and their exit codes.

use laas_vault::VaultError;
use thiserror::Error;

/// Exit code for rejected input.
pub const EXIT_VALIDATION: u8 = 2;
/// Exit code when no entry matches the requested platform.
pub const EXIT_NOT_FOUND: u8 = 3;
/// Exit code when delete-all finds no vault files.
pub const EXIT_NOTHING_TO_DELETE: u8 = 4;
/// Exit code for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Errors surfaced to the user by the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// Reading interactive input failed or no terminal was available.
    #[error("{0}")]
    Prompt(String),

    /// The user declined a confirmation.
    #[error("aborted")]
    Aborted,

    /// Writing to stdout failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("could not serialize configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Vault(VaultError::Validation(_)) => EXIT_VALIDATION,
            Self::Vault(VaultError::NotFound(_)) => EXIT_NOT_FOUND,
            Self::Vault(VaultError::NothingToDelete) => EXIT_NOTHING_TO_DELETE,
            _ => EXIT_FAILURE,
        }
    }
}

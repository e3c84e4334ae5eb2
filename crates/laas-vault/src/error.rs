//! Vault error types for `laas-vault`.

use std::path::PathBuf;

use laas_crypto_core::CryptoError;
use thiserror::Error;

/// Errors produced by vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Cryptographic operation failed (delegated from crypto-core).
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// I/O error from the filesystem (missing, unreadable, unwritable).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Save attempted while the key file does not exist.
    #[error("key file is missing: {}", .0.display())]
    MissingKey(PathBuf),

    /// Input rejected before touching the store.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record matches the requested platform.
    #[error("no entry found for platform: {0}")]
    NotFound(String),

    /// Delete-all requested but neither the data file nor the key file exists.
    #[error("no vault data found to delete")]
    NothingToDelete,

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<csv::Error> for VaultError {
    fn from(err: csv::Error) -> Self {
        Self::Io(std::io::Error::from(err))
    }
}

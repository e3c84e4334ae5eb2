//! Key file lifecycle — the single long-lived vault key.
//!
//! The key is 32 raw bytes in its own file, created on first use and never
//! rewritten afterwards. It is only destroyed by an explicit delete-all.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use laas_crypto_core::memory::{SecretBuffer, SecretBytes};
use laas_crypto_core::{CryptoError, KEY_LEN};

use crate::error::VaultError;

/// Loads or creates the vault key at a fixed path.
#[derive(Debug, Clone)]
pub struct KeyManager {
    path: PathBuf,
}

impl KeyManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the key file, or generate and persist a fresh key if there is none.
    ///
    /// The bytes are returned as read. Length is not checked here; a key of
    /// the wrong size is rejected when a `CipherBox` is built from it.
    ///
    /// # Errors
    ///
    /// - [`VaultError::Io`] if the file cannot be read or created
    /// - [`VaultError::Crypto`] if the key file is empty or the CSPRNG fails
    pub fn get_or_create_key(&self) -> Result<SecretBuffer, VaultError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Err(CryptoError::InvalidKeyMaterial(format!(
                "key file {} is empty",
                self.path.display()
            ))
            .into()),
            Ok(bytes) => {
                tracing::debug!(path = %self.path.display(), "loaded vault key");
                Ok(SecretBuffer::from_vec(bytes))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.create(),
            Err(e) => Err(e.into()),
        }
    }

    fn create(&self) -> Result<SecretBuffer, VaultError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let key = SecretBytes::<KEY_LEN>::random()?;

        // create_new: an existing key is never overwritten.
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)?;
        file.write_all(key.expose())?;
        file.sync_all()?;

        tracing::info!(path = %self.path.display(), "created new vault key");
        Ok(SecretBuffer::new(key.expose()))
    }

    /// Delete the key file. Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the file exists but cannot be removed.
    pub fn remove(&self) -> Result<bool, VaultError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_call_creates_key_file() {
        let dir = TempDir::new().unwrap();
        let keys = KeyManager::new(dir.path().join("secret.key"));
        assert!(!keys.exists());

        let key = keys.get_or_create_key().unwrap();
        assert_eq!(key.len(), KEY_LEN);
        assert!(keys.exists());
        assert_eq!(fs::read(keys.path()).unwrap(), key.expose());
    }

    #[test]
    fn second_call_reads_same_key() {
        let dir = TempDir::new().unwrap();
        let keys = KeyManager::new(dir.path().join("secret.key"));
        let first = keys.get_or_create_key().unwrap();
        let second = keys.get_or_create_key().unwrap();
        assert_eq!(first.expose(), second.expose());
    }

    #[test]
    fn creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let keys = KeyManager::new(dir.path().join("nested/vault/secret.key"));
        keys.get_or_create_key().unwrap();
        assert!(keys.exists());
    }

    #[test]
    fn wrong_length_key_is_returned_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.key");
        fs::write(&path, b"not a 32 byte key").unwrap();

        let key = KeyManager::new(&path).get_or_create_key().unwrap();
        assert_eq!(key.expose(), b"not a 32 byte key");
    }

    #[test]
    fn empty_key_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.key");
        fs::write(&path, b"").unwrap();

        let err = KeyManager::new(&path).get_or_create_key().unwrap_err();
        assert!(matches!(
            err,
            VaultError::Crypto(CryptoError::InvalidKeyMaterial(_))
        ));
        // The empty file is left alone, not replaced by a fresh key.
        assert_eq!(fs::read(&path).unwrap(), b"");
    }

    #[test]
    fn remove_reports_whether_a_file_was_deleted() {
        let dir = TempDir::new().unwrap();
        let keys = KeyManager::new(dir.path().join("secret.key"));
        assert!(!keys.remove().unwrap());
        keys.get_or_create_key().unwrap();
        assert!(keys.remove().unwrap());
        assert!(!keys.exists());
    }
}

//! [`VaultService`] — the operations a front end calls.
//!
//! Owns the in-memory [`VaultStore`] and keeps the data file in step with it:
//! every successful mutation is followed by a full rewrite through
//! [`RecordStore::save`]. Single-threaded; one service per vault directory.

use std::path::Path;

use chrono::{Local, NaiveDateTime, SubsecRound};
use laas_crypto_core::{CipherBox, PasswordGenerator};
use secrecy::SecretString;

use crate::config::{PasswordPolicy, VaultConfig};
use crate::error::VaultError;
use crate::key_file::KeyManager;
use crate::store::{Record, RecordStore, VaultStore};

/// A decrypted entry, as returned by [`VaultService::retrieve`].
#[derive(Debug)]
pub struct Credential {
    /// Platform name as stored, which may differ in case from the query.
    pub platform: String,
    pub username: String,
    pub password: SecretString,
    pub saved_at: Option<NaiveDateTime>,
}

/// Key file and data file handles for `vault_dir` under `config`.
///
/// Builds the handles only; neither file is touched.
#[must_use]
pub fn vault_files(config: &VaultConfig, vault_dir: &Path) -> (KeyManager, RecordStore) {
    let keys = KeyManager::new(vault_dir.join(&config.key_file));
    let store = RecordStore::new(vault_dir.join(&config.data_file), keys.path());
    (keys, store)
}

/// Remove the data file and the key file.
///
/// Usable without opening the vault, so wiping a directory that has no key
/// yet does not create one first.
///
/// # Errors
///
/// - [`VaultError::NothingToDelete`] if neither file exists
/// - [`VaultError::Io`] if a file exists but cannot be removed
pub fn delete_vault_files(keys: &KeyManager, store: &RecordStore) -> Result<(), VaultError> {
    if !keys.exists() && !store.exists() {
        return Err(VaultError::NothingToDelete);
    }
    let data_removed = store.remove()?;
    let key_removed = keys.remove()?;
    tracing::info!(data_removed, key_removed, "deleted vault files");
    Ok(())
}

/// Credential vault bound to one key and one data file.
pub struct VaultService {
    keys: KeyManager,
    store: RecordStore,
    cipher: CipherBox,
    generator: PasswordGenerator,
    policy: PasswordPolicy,
    records: VaultStore,
}

impl VaultService {
    /// Open the vault in `vault_dir`, creating the key file if it is missing.
    ///
    /// # Errors
    ///
    /// - [`VaultError::Config`] if `config` does not validate
    /// - [`VaultError::Io`] if the key or data file cannot be read
    /// - [`VaultError::Crypto`] if the key file holds invalid key material
    pub fn open(config: &VaultConfig, vault_dir: &Path) -> Result<Self, VaultError> {
        config.validate()?;
        let (keys, store) = vault_files(config, vault_dir);

        let key = keys.get_or_create_key()?;
        let cipher = CipherBox::new(key.expose())?;
        let generator =
            PasswordGenerator::new(config.generator).map_err(|e| VaultError::Config(e.to_string()))?;

        Self::from_parts(keys, store, cipher, generator, config.password)
    }

    /// Assemble a service from already-built parts and load the data file.
    ///
    /// `cipher` is used as given; it does not have to match `keys`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the data file exists but cannot be read.
    pub fn from_parts(
        keys: KeyManager,
        store: RecordStore,
        cipher: CipherBox,
        generator: PasswordGenerator,
        policy: PasswordPolicy,
    ) -> Result<Self, VaultError> {
        let records = store.load()?;
        Ok(Self {
            keys,
            store,
            cipher,
            generator,
            policy,
            records,
        })
    }

    /// Encrypt and save a password, replacing any entry for the same platform.
    ///
    /// All three fields are trimmed of surrounding whitespace before they
    /// are checked.
    /// If the save fails, the in-memory store is left as it was.
    ///
    /// # Errors
    ///
    /// - [`VaultError::Validation`] if a field is empty or the password
    ///   length is outside the policy
    /// - [`VaultError::MissingKey`] if the key file has disappeared
    /// - [`VaultError::Io`] / [`VaultError::Crypto`] on write or encryption failure
    pub fn add(&mut self, platform: &str, username: &str, password: &str) -> Result<(), VaultError> {
        let platform = platform.trim();
        let username = username.trim();
        let password = password.trim();
        if platform.is_empty() || username.is_empty() || password.is_empty() {
            return Err(VaultError::Validation(
                "platform, username and password must all be filled in".into(),
            ));
        }
        self.policy.check(password)?;

        let record = Record {
            platform: platform.to_owned(),
            username: username.to_owned(),
            encrypted_password: self.cipher.encrypt(password)?,
            timestamp: Some(Local::now().naive_local().trunc_subsecs(0)),
            unparsed_date: None,
        };
        let previous = self.records.insert(record);

        if let Err(e) = self.store.save(&self.records) {
            match previous {
                Some(old) => {
                    self.records.insert(old);
                }
                None => {
                    self.records.remove(platform);
                }
            }
            return Err(e);
        }

        tracing::info!(platform, replaced = previous.is_some(), "saved entry");
        Ok(())
    }

    /// Look up and decrypt the entry for `platform`.
    ///
    /// An exact match wins; otherwise the first case-insensitive match.
    ///
    /// # Errors
    ///
    /// - [`VaultError::NotFound`] if no entry matches
    /// - [`VaultError::Crypto`] if the stored ciphertext does not decrypt
    ///   under this vault's key
    pub fn retrieve(&self, platform: &str) -> Result<Credential, VaultError> {
        let query = platform.trim();
        let record = self
            .records
            .find(query)
            .ok_or_else(|| VaultError::NotFound(query.to_owned()))?;
        let password = self.cipher.decrypt(&record.encrypted_password)?;

        tracing::debug!(platform = %record.platform, "retrieved entry");
        Ok(Credential {
            platform: record.platform.clone(),
            username: record.username.clone(),
            password,
            saved_at: record.timestamp,
        })
    }

    /// Forget every entry and remove the data and key files.
    ///
    /// The service is unusable for further saves afterwards: the key file is
    /// gone, so [`VaultService::add`] fails with [`VaultError::MissingKey`].
    ///
    /// # Errors
    ///
    /// Same as [`delete_vault_files`].
    pub fn delete_all(&mut self) -> Result<(), VaultError> {
        self.records.clear();
        delete_vault_files(&self.keys, &self.store)
    }

    /// A fresh random password under the configured generator policy.
    #[must_use]
    pub fn generate_password(&self) -> String {
        self.generator.generate()
    }

    /// Stored platform names, in store order.
    #[must_use]
    pub fn platforms(&self) -> Vec<&str> {
        self.records.platforms().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub const fn policy(&self) -> PasswordPolicy {
        self.policy
    }

    #[must_use]
    pub fn data_path(&self) -> &Path {
        self.store.path()
    }

    #[must_use]
    pub fn key_path(&self) -> &Path {
        self.keys.path()
    }
}

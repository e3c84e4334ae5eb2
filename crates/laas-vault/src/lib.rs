//! `laas-vault` — vault business logic for LAAS.
//!
//! Owns everything that touches disk: the key file, the CSV record store and
//! the JSON configuration, plus the [`VaultService`] that ties them to the
//! primitives in `laas-crypto-core`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod config;
pub mod error;
pub mod key_file;

pub mod store;

pub mod service;

pub use config::{PasswordPolicy, VaultConfig, CONFIG_FILE};
pub use error::VaultError;
pub use key_file::KeyManager;
pub use service::{delete_vault_files, vault_files, Credential, VaultService};
pub use store::{Record, RecordStore, VaultStore, TIMESTAMP_FORMAT};

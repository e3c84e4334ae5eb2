//! `laas-crypto-core` — cryptographic primitives for the LAAS credential vault.
//!
//! Pure code: no filesystem, no network, no logging. The vault crate owns
//! key files and persistence and calls in here for everything secret.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod symmetric;

pub mod cipher_box;

pub mod password;

pub use cipher_box::{CipherBox, PASSWORD_AAD};
pub use error::CryptoError;
pub use memory::{disable_core_dumps, LockedRegion, SecretBuffer, SecretBytes};
pub use password::{GeneratorPolicy, PasswordGenerator, ALPHABET};
pub use symmetric::{SealedData, FORMAT_VERSION, KEY_LEN};

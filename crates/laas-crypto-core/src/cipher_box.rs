//! [`CipherBox`] — one vault key, bound to password encryption.
//!
//! Every password stored by the vault goes through [`CipherBox::encrypt`],
//! and comes back only through [`CipherBox::decrypt`]. The box performs no
//! I/O; the caller is responsible for obtaining the key.

use std::fmt;

use secrecy::SecretString;
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::memory::SecretBytes;
use crate::symmetric::{self, SealedData, KEY_LEN};

/// Domain separation tag bound into every password ciphertext.
pub const PASSWORD_AAD: &[u8] = b"laas-password";

/// Authenticated encrypt/decrypt of individual password values under one key.
pub struct CipherBox {
    key: SecretBytes<KEY_LEN>,
}

impl CipherBox {
    /// Build a cipher box from raw key bytes (as read from the key file).
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyMaterial` if `key` is not exactly
    /// [`KEY_LEN`] bytes.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self {
            key: SecretBytes::from_slice(key)?,
        })
    }

    /// Encrypt one password.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Encryption` if sealing fails.
    pub fn encrypt(&self, plaintext: &str) -> Result<SealedData, CryptoError> {
        symmetric::encrypt(plaintext.as_bytes(), self.key.expose(), PASSWORD_AAD)
    }

    /// Encrypt the string form of any displayable value.
    ///
    /// The conversion happens here, before the cipher sees the data, and
    /// the intermediate string is wiped afterwards.
    ///
    /// # Errors
    ///
    /// Same as [`CipherBox::encrypt`].
    pub fn encrypt_display<T: fmt::Display + ?Sized>(
        &self,
        value: &T,
    ) -> Result<SealedData, CryptoError> {
        let mut text = value.to_string();
        let sealed = self.encrypt(&text);
        text.zeroize();
        sealed
    }

    /// Decrypt one password.
    ///
    /// # Errors
    ///
    /// - `CryptoError::Decryption` if authentication fails (tampered data,
    ///   different key)
    /// - `CryptoError::MalformedCiphertext` if the authenticated plaintext
    ///   is not valid UTF-8
    pub fn decrypt(&self, sealed: &SealedData) -> Result<SecretString, CryptoError> {
        let plaintext = symmetric::decrypt(sealed, self.key.expose(), PASSWORD_AAD)?;
        let text = std::str::from_utf8(plaintext.expose()).map_err(|_| {
            CryptoError::MalformedCiphertext("decrypted password is not UTF-8".into())
        })?;
        Ok(SecretString::from(text.to_owned()))
    }

    /// Parse a wire-format blob and decrypt it.
    ///
    /// # Errors
    ///
    /// Any error of [`SealedData::from_bytes`] or [`CipherBox::decrypt`].
    pub fn decrypt_bytes(&self, blob: &[u8]) -> Result<SecretString, CryptoError> {
        self.decrypt(&SealedData::from_bytes(blob)?)
    }
}

impl fmt::Debug for CipherBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CipherBox(***)")
    }
}

//! AES-256-GCM authenticated encryption with a versioned wire format.
//!
//! - [`encrypt`] — seal plaintext under a fresh random nonce
//! - [`decrypt`] — authenticate and open a [`SealedData`]
//! - [`SealedData`] — `version || nonce || ciphertext || tag`
//!
//! The version byte is bound into the AAD, so a blob cannot be replayed
//! under a different format version without failing authentication.

use crate::error::CryptoError;
use crate::memory::SecretBuffer;
use rand::rngs::OsRng;
use rand::RngCore;
use ring::aead;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Current wire format version.
pub const FORMAT_VERSION: u8 = 1;

/// AES-256-GCM nonce length in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// AES-256-GCM authentication tag length in bytes (128 bits).
pub const TAG_LEN: usize = 16;

/// AES-256-GCM key length in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Version byte + nonce + empty ciphertext + tag.
pub const MIN_SEALED_LEN: usize = 1 + NONCE_LEN + TAG_LEN;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Authenticated ciphertext container.
///
/// Wire format: `version (1) || nonce (12) || ciphertext (n) || tag (16)`.
/// Any modification of any byte makes [`decrypt`] (or [`SealedData::from_bytes`]
/// for the version byte and length) fail.
#[must_use = "encrypted data must be stored or transmitted"]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedData {
    version: u8,
    nonce: [u8; NONCE_LEN],
    ciphertext: Vec<u8>,
    tag: [u8; TAG_LEN],
}

impl SealedData {
    /// Format version this blob was produced under.
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// Length of the encrypted payload (equals plaintext length).
    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.ciphertext.len()
    }

    /// Serialize to wire format.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let capacity = MIN_SEALED_LEN.saturating_add(self.ciphertext.len());
        let mut out = Vec::with_capacity(capacity);
        out.push(self.version);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.tag);
        out
    }

    /// Parse the wire format. Only structure is checked here; authenticity
    /// is checked by [`decrypt`].
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::MalformedCiphertext` if the input is shorter than
    /// [`MIN_SEALED_LEN`] or carries an unknown version byte.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let Some((&version, rest)) = bytes.split_first() else {
            return Err(CryptoError::MalformedCiphertext("empty input".into()));
        };
        if version != FORMAT_VERSION {
            return Err(CryptoError::MalformedCiphertext(format!(
                "unsupported version {version}"
            )));
        }
        if bytes.len() < MIN_SEALED_LEN {
            return Err(CryptoError::MalformedCiphertext(format!(
                "{} bytes (minimum {MIN_SEALED_LEN})",
                bytes.len()
            )));
        }

        let (nonce_bytes, rest) = rest.split_at(NONCE_LEN);
        // Guarded by the MIN_SEALED_LEN check above.
        let ct_len = rest
            .len()
            .checked_sub(TAG_LEN)
            .ok_or_else(|| CryptoError::MalformedCiphertext("length underflow".into()))?;
        let (ciphertext, tag_bytes) = rest.split_at(ct_len);

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(tag_bytes);

        Ok(Self {
            version,
            nonce,
            ciphertext: ciphertext.to_vec(),
            tag,
        })
    }
}

// ---------------------------------------------------------------------------
// Core encryption
// ---------------------------------------------------------------------------

fn opening_key(key: &[u8]) -> Result<aead::LessSafeKey, CryptoError> {
    if key.len() != KEY_LEN {
        return Err(CryptoError::InvalidKeyMaterial(format!(
            "invalid key length: {} bytes (expected {KEY_LEN})",
            key.len()
        )));
    }
    let unbound = aead::UnboundKey::new(&aead::AES_256_GCM, key)
        .map_err(|_| CryptoError::Encryption("failed to create AES-256-GCM key".into()))?;
    Ok(aead::LessSafeKey::new(unbound))
}

fn versioned_aad(version: u8, aad: &[u8]) -> Vec<u8> {
    let mut full = Vec::with_capacity(aad.len().saturating_add(1));
    full.push(version);
    full.extend_from_slice(aad);
    full
}

/// Encrypt `plaintext` with AES-256-GCM under a random 96-bit nonce.
///
/// # Errors
///
/// - `CryptoError::InvalidKeyMaterial` if the key is not 32 bytes
/// - `CryptoError::Encryption` if sealing fails
pub fn encrypt(plaintext: &[u8], key: &[u8], aad: &[u8]) -> Result<SealedData, CryptoError> {
    let key = opening_key(key)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce_bytes)
        .map_err(|e| CryptoError::Encryption(format!("nonce generation failed: {e}")))?;
    let nonce = aead::Nonce::assume_unique_for_key(nonce_bytes);
    let aad = versioned_aad(FORMAT_VERSION, aad);

    let mut in_out = plaintext.to_vec();
    let Ok(tag) = key.seal_in_place_separate_tag(nonce, aead::Aad::from(&aad), &mut in_out)
    else {
        in_out.zeroize();
        return Err(CryptoError::Encryption(
            "AES-256-GCM encryption failed".into(),
        ));
    };

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(tag.as_ref());

    Ok(SealedData {
        version: FORMAT_VERSION,
        nonce: nonce_bytes,
        ciphertext: in_out,
        tag: tag_bytes,
    })
}

/// Authenticate and decrypt `sealed`.
///
/// # Errors
///
/// - `CryptoError::InvalidKeyMaterial` if the key is not 32 bytes
/// - `CryptoError::Decryption` on tag mismatch (tampering, wrong key, wrong AAD)
pub fn decrypt(sealed: &SealedData, key: &[u8], aad: &[u8]) -> Result<SecretBuffer, CryptoError> {
    let key = opening_key(key)?;
    let nonce = aead::Nonce::assume_unique_for_key(sealed.nonce);
    let aad = versioned_aad(sealed.version, aad);

    let mut ct_tag = Vec::with_capacity(sealed.ciphertext.len().saturating_add(TAG_LEN));
    ct_tag.extend_from_slice(&sealed.ciphertext);
    ct_tag.extend_from_slice(&sealed.tag);

    let opened = key
        .open_in_place(nonce, aead::Aad::from(&aad), &mut ct_tag)
        .map(|plaintext| SecretBuffer::new(plaintext));
    ct_tag.zeroize();
    opened.map_err(|_| CryptoError::Decryption)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: [u8; KEY_LEN] = [0xAA; KEY_LEN];
    const WRONG_KEY: [u8; KEY_LEN] = [0xBB; KEY_LEN];

    #[test]
    fn wire_length_is_header_plus_plaintext() {
        let sealed = encrypt(b"pw123456", &TEST_KEY, &[]).unwrap();
        assert_eq!(sealed.to_bytes().len(), MIN_SEALED_LEN + 8);
        assert_eq!(sealed.payload_len(), 8);
        assert_eq!(sealed.version(), FORMAT_VERSION);
    }

    #[test]
    fn roundtrip_through_wire_format() {
        let sealed = encrypt(b"correct horse", &TEST_KEY, b"ctx").unwrap();
        let restored = SealedData::from_bytes(&sealed.to_bytes()).unwrap();
        assert_eq!(restored, sealed);
        let plain = decrypt(&restored, &TEST_KEY, b"ctx").unwrap();
        assert_eq!(plain.expose(), b"correct horse");
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let sealed = encrypt(b"test data", &TEST_KEY, &[]).unwrap();
        assert!(matches!(
            decrypt(&sealed, &WRONG_KEY, &[]),
            Err(CryptoError::Decryption)
        ));
    }

    #[test]
    fn aad_mismatch_fails_authentication() {
        let sealed = encrypt(b"test data", &TEST_KEY, b"a").unwrap();
        assert!(matches!(
            decrypt(&sealed, &TEST_KEY, b"b"),
            Err(CryptoError::Decryption)
        ));
    }

    #[test]
    fn every_flipped_byte_is_rejected() {
        let wire = encrypt(b"flip me please", &TEST_KEY, &[]).unwrap().to_bytes();
        for i in 0..wire.len() {
            let mut tampered = wire.clone();
            tampered[i] ^= 0x01;
            let outcome =
                SealedData::from_bytes(&tampered).and_then(|s| decrypt(&s, &TEST_KEY, &[]));
            assert!(outcome.is_err(), "byte {i} flip was not detected");
        }
    }

    #[test]
    fn from_bytes_rejects_short_input() {
        let mut short = vec![FORMAT_VERSION];
        short.extend_from_slice(&[0u8; NONCE_LEN + TAG_LEN - 1]);
        assert!(matches!(
            SealedData::from_bytes(&short),
            Err(CryptoError::MalformedCiphertext(_))
        ));
        assert!(SealedData::from_bytes(&[]).is_err());
    }

    #[test]
    fn from_bytes_rejects_unknown_version() {
        let mut wire = encrypt(b"x", &TEST_KEY, &[]).unwrap().to_bytes();
        wire[0] = 0x80;
        let err = SealedData::from_bytes(&wire).unwrap_err();
        assert!(err.to_string().contains("unsupported version 128"));
    }

    #[test]
    fn rejects_wrong_key_length() {
        let err = encrypt(b"x", &[0u8; 16], &[]).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKeyMaterial(_)));
    }

    #[test]
    fn nonces_are_fresh_per_call() {
        let a = encrypt(b"same", &TEST_KEY, &[]).unwrap();
        let b = encrypt(b"same", &TEST_KEY, &[]).unwrap();
        assert_ne!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn sealed_data_serde_roundtrip() {
        let sealed = encrypt(b"serde", &TEST_KEY, &[]).unwrap();
        let json = serde_json::to_string(&sealed).unwrap();
        let back: SealedData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sealed);
    }
}

//! Cryptographic error types for `laas-crypto-core`.

use thiserror::Error;

/// Errors produced by cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Encryption failure (AES-256-GCM seal or key setup).
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Authentication tag verification failed: ciphertext tampered or wrong key.
    #[error("decryption failed: authentication tag mismatch")]
    Decryption,

    /// Ciphertext blob is structurally invalid (truncated, unknown version,
    /// or plaintext that is not UTF-8).
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// Invalid key material (wrong length, empty key file).
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// Secure memory allocation or CSPRNG failure.
    #[error("secure memory error: {0}")]
    SecureMemory(String),

    /// Password generation policy is invalid.
    #[error("password generation error: {0}")]
    PasswordGeneration(String),
}

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for secure memory types.

use laas_crypto_core::memory::{SecretBuffer, SecretBytes};
use laas_crypto_core::{CryptoError, KEY_LEN};
use proptest::prelude::*;

proptest! {
    /// Key files of any length other than 32 bytes are refused.
    #[test]
    fn from_slice_accepts_only_exact_length(data in proptest::collection::vec(any::<u8>(), 0..96)) {
        let result = SecretBytes::<KEY_LEN>::from_slice(&data);
        if data.len() == KEY_LEN {
            let key = result.unwrap();
            prop_assert_eq!(key.expose().as_slice(), data.as_slice());
        } else {
            prop_assert!(matches!(result, Err(CryptoError::InvalidKeyMaterial(_))));
        }
    }

    /// Content and length survive both constructors.
    #[test]
    fn secret_buffer_keeps_bytes(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let borrowed = SecretBuffer::new(&data);
        let owned = SecretBuffer::from_vec(data.clone());
        prop_assert_eq!(borrowed.expose(), data.as_slice());
        prop_assert_eq!(owned.expose(), data.as_slice());
        prop_assert_eq!(owned.len(), data.len());
        prop_assert_eq!(owned.is_empty(), data.is_empty());
    }

    /// Debug output is always the mask, whatever the content.
    #[test]
    fn secret_buffer_debug_never_leaks(data in proptest::collection::vec(any::<u8>(), 1..256)) {
        let debug = format!("{:?}", SecretBuffer::new(&data));
        prop_assert_eq!(debug.as_str(), "SecretBuffer(***)");
    }
}

#[test]
fn random_keys_have_key_length() {
    let key = SecretBytes::<KEY_LEN>::random().unwrap();
    assert_eq!(key.expose().len(), KEY_LEN);
    assert_eq!(format!("{key:?}"), "SecretBytes<32>(***)");
}

//! Entropy smoke test for generated key material.
//!
//! A 32-byte uniform sample averages about 4.9 bits/byte of Shannon entropy
//! (most byte values never appear). The 4.0 threshold only catches degenerate
//! output such as all-zero or repeated bytes.

use laas_crypto_core::memory::SecretBytes;
use laas_crypto_core::KEY_LEN;

#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut freq = [0u64; 256];
    for &b in data {
        freq[b as usize] += 1;
    }
    let len = data.len() as f64;
    freq.iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[test]
fn vault_key_entropy() {
    let key = SecretBytes::<KEY_LEN>::random().expect("CSPRNG should succeed");
    let entropy = shannon_entropy(key.expose());
    assert!(entropy > 4.0, "key entropy too low: {entropy:.4}");
}

#[test]
fn consecutive_keys_differ() {
    let a = SecretBytes::<KEY_LEN>::random().expect("CSPRNG should succeed");
    let b = SecretBytes::<KEY_LEN>::random().expect("CSPRNG should succeed");
    assert_ne!(a.expose(), b.expose());
}

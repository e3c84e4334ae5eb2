//! Statistical checks on [`PasswordGenerator`] output.
//!
//! 10,000 passwords of 12–19 characters give roughly 155,000 draws over 94
//! symbols, about 1,650 per symbol with a standard deviation near 40. The
//! ±25% band below is more than ten deviations wide, so a failure means a
//! real bias rather than noise.

use std::collections::HashMap;

use laas_crypto_core::password::{GeneratorPolicy, PasswordGenerator, ALPHABET};

const SAMPLES: usize = 10_000;

#[test]
fn lengths_stay_in_policy_bounds_and_cover_range() {
    let generator = PasswordGenerator::default();
    let policy = generator.policy();
    let mut seen = vec![false; policy.max_length + 1];

    for _ in 0..SAMPLES {
        let len = generator.generate().len();
        assert!(
            (policy.min_length..=policy.max_length).contains(&len),
            "length {len} outside {}..={}",
            policy.min_length,
            policy.max_length
        );
        seen[len] = true;
    }

    for len in policy.min_length..=policy.max_length {
        assert!(seen[len], "length {len} never drawn in {SAMPLES} samples");
    }
}

#[test]
fn only_alphabet_characters_are_used() {
    let generator = PasswordGenerator::default();
    for _ in 0..SAMPLES {
        let pw = generator.generate();
        assert!(
            pw.bytes().all(|b| ALPHABET.contains(&b)),
            "unexpected character in {pw:?}"
        );
    }
}

#[allow(clippy::cast_precision_loss)]
#[test]
fn character_frequency_is_approximately_uniform() {
    let generator = PasswordGenerator::default();
    let mut counts: HashMap<u8, usize> = HashMap::new();
    let mut total = 0usize;

    for _ in 0..SAMPLES {
        for b in generator.generate().bytes() {
            *counts.entry(b).or_default() += 1;
            total += 1;
        }
    }

    let expected = total as f64 / ALPHABET.len() as f64;
    for &symbol in ALPHABET {
        let observed = counts.get(&symbol).copied().unwrap_or(0) as f64;
        let deviation = (observed - expected).abs() / expected;
        assert!(
            deviation < 0.25,
            "symbol {:?} drawn {observed} times, expected about {expected:.0}",
            char::from(symbol)
        );
    }
}

#[test]
fn alternate_policy_is_honoured() {
    let generator = PasswordGenerator::new(GeneratorPolicy {
        min_length: 8,
        max_length: 25,
    })
    .unwrap();
    for _ in 0..1_000 {
        let len = generator.generate().len();
        assert!((8..=25).contains(&len));
    }
}

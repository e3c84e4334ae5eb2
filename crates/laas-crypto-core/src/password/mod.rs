//! Random password generation.
//!
//! A [`PasswordGenerator`] draws a length uniformly from its
//! [`GeneratorPolicy`] range, then draws each character independently and
//! uniformly from [`ALPHABET`]. All randomness comes from `OsRng`; index
//! sampling goes through `rand`'s `Uniform`, which rejects out-of-zone draws
//! instead of reducing modulo the alphabet size.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Uppercase, lowercase, digits, then the 32 ASCII punctuation characters.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
abcdefghijklmnopqrstuvwxyz\
0123456789\
!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Default shortest generated password.
pub const DEFAULT_MIN_LENGTH: usize = 12;

/// Default longest generated password.
pub const DEFAULT_MAX_LENGTH: usize = 19;

/// Hard ceiling for any policy.
pub const MAX_GENERATED_LENGTH: usize = 128;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Inclusive length range for generated passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorPolicy {
    /// Shortest length that may be drawn.
    pub min_length: usize,
    /// Longest length that may be drawn.
    pub max_length: usize,
}

impl Default for GeneratorPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl GeneratorPolicy {
    /// Check the range is usable.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::PasswordGeneration`] if `min_length` is zero,
    /// `min_length > max_length`, or `max_length` exceeds
    /// [`MAX_GENERATED_LENGTH`].
    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.min_length == 0 {
            return Err(CryptoError::PasswordGeneration(
                "minimum length must be at least 1".into(),
            ));
        }
        if self.min_length > self.max_length {
            return Err(CryptoError::PasswordGeneration(format!(
                "minimum length {} exceeds maximum length {}",
                self.min_length, self.max_length
            )));
        }
        if self.max_length > MAX_GENERATED_LENGTH {
            return Err(CryptoError::PasswordGeneration(format!(
                "maximum length {} exceeds limit {MAX_GENERATED_LENGTH}",
                self.max_length
            )));
        }
        Ok(())
    }
}

/// Stateless generator bound to one validated policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordGenerator {
    policy: GeneratorPolicy,
}

impl PasswordGenerator {
    /// # Errors
    ///
    /// Returns [`CryptoError::PasswordGeneration`] if `policy` is invalid.
    pub fn new(policy: GeneratorPolicy) -> Result<Self, CryptoError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    #[must_use]
    pub const fn policy(&self) -> GeneratorPolicy {
        self.policy
    }

    /// Generate one password.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut rng = OsRng;
        let length =
            Uniform::new_inclusive(self.policy.min_length, self.policy.max_length).sample(&mut rng);
        let index = Uniform::from(0..ALPHABET.len());
        (0..length)
            .map(|_| char::from(ALPHABET[index.sample(&mut rng)]))
            .collect()
    }
}

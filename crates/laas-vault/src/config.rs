//! Vault configuration — plain JSON next to the vault files.
//!
//! Nothing in here is secret. A missing file means defaults; a corrupt file
//! is logged and replaced by defaults so the vault stays usable.

use std::fs;
use std::path::Path;

use laas_crypto_core::password::GeneratorPolicy;
use serde::{Deserialize, Serialize};

use crate::error::VaultError;

/// Configuration file name inside the vault directory.
pub const CONFIG_FILE: &str = "laas.json";

/// Default data file name.
pub const DEFAULT_DATA_FILE: &str = "passwords.csv";

/// Default key file name.
pub const DEFAULT_KEY_FILE: &str = "secret.key";

/// Shortest password accepted by `add`.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Longest password accepted by `add`.
pub const MAX_PASSWORD_LENGTH: usize = 25;

// ── Password acceptance policy ─────────────────────────────────────

/// Inclusive length bounds (in characters) for stored passwords.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPolicy {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            max_length: MAX_PASSWORD_LENGTH,
        }
    }
}

const fn default_min_length() -> usize {
    MIN_PASSWORD_LENGTH
}
const fn default_max_length() -> usize {
    MAX_PASSWORD_LENGTH
}

impl PasswordPolicy {
    /// Check a password against the length bounds.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Validation`] if the password is outside the bounds.
    pub fn check(&self, password: &str) -> Result<(), VaultError> {
        let len = password.chars().count();
        if (self.min_length..=self.max_length).contains(&len) {
            Ok(())
        } else {
            Err(VaultError::Validation(format!(
                "password must be between {} and {} characters long",
                self.min_length, self.max_length
            )))
        }
    }
}

// ── Top-level configuration ────────────────────────────────────────

/// Vault configuration, persisted as `{vault_dir}/laas.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VaultConfig {
    /// File holding the records, relative to the vault directory.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// File holding the raw key, relative to the vault directory.
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// Length bounds enforced when saving a password.
    #[serde(default)]
    pub password: PasswordPolicy,

    /// Length range for generated passwords.
    #[serde(default)]
    pub generator: GeneratorPolicy,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            key_file: default_key_file(),
            password: PasswordPolicy::default(),
            generator: GeneratorPolicy::default(),
        }
    }
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.into()
}
fn default_key_file() -> String {
    DEFAULT_KEY_FILE.into()
}

impl VaultConfig {
    /// Load `{vault_dir}/laas.json`, falling back to defaults when the file
    /// is missing or not valid JSON.
    #[must_use]
    pub fn load(vault_dir: &Path) -> Self {
        let path = vault_dir.join(CONFIG_FILE);
        let Ok(contents) = fs::read_to_string(&path) else {
            return Self::default();
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "ignoring unreadable config: {e}");
            Self::default()
        })
    }

    /// Reject configurations the vault cannot operate with.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<(), VaultError> {
        for (field, name) in [("dataFile", &self.data_file), ("keyFile", &self.key_file)] {
            if name.trim().is_empty() {
                return Err(VaultError::Config(format!("{field} must not be empty")));
            }
            if name == CONFIG_FILE {
                return Err(VaultError::Config(format!(
                    "{field} must not be the config file {CONFIG_FILE}"
                )));
            }
        }
        if self.data_file == self.key_file {
            return Err(VaultError::Config(
                "dataFile and keyFile must be different files".into(),
            ));
        }

        let pw = self.password;
        if pw.min_length == 0 || pw.min_length > pw.max_length {
            return Err(VaultError::Config(format!(
                "password length bounds {}..={} are invalid",
                pw.min_length, pw.max_length
            )));
        }

        self.generator
            .validate()
            .map_err(|e| VaultError::Config(e.to_string()))?;

        // Every generated password must be savable.
        let range = self.generator;
        if range.min_length < pw.min_length || range.max_length > pw.max_length {
            return Err(VaultError::Config(format!(
                "generator range {}..={} must lie within password range {}..={}",
                range.min_length, range.max_length, pw.min_length, pw.max_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_use_csv_and_key_file_names() {
        let config = VaultConfig::default();
        assert_eq!(config.data_file, "passwords.csv");
        assert_eq!(config.key_file, "secret.key");
        assert_eq!(config.password.min_length, 8);
        assert_eq!(config.password.max_length, 25);
        assert_eq!(config.generator.min_length, 12);
        assert_eq!(config.generator.max_length, 19);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_returns_default_on_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(VaultConfig::load(dir.path()), VaultConfig::default());
    }

    #[test]
    fn load_recovers_from_corrupt_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{ not json ]").unwrap();
        assert_eq!(VaultConfig::load(dir.path()), VaultConfig::default());
    }

    #[test]
    fn load_fills_missing_fields_with_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"dataFile":"passord.csv","generator":{"minLength":8,"maxLength":25}}"#,
        )
        .unwrap();

        let config = VaultConfig::load(dir.path());
        assert_eq!(config.data_file, "passord.csv");
        assert_eq!(config.key_file, "secret.key");
        assert_eq!(config.generator.max_length, 25);
        assert_eq!(config.password, PasswordPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_same_file_for_data_and_key() {
        let config = VaultConfig {
            key_file: "passwords.csv".into(),
            ..VaultConfig::default()
        };
        assert!(matches!(config.validate(), Err(VaultError::Config(_))));
    }

    #[test]
    fn validate_rejects_empty_file_name() {
        let config = VaultConfig {
            data_file: "  ".into(),
            ..VaultConfig::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("dataFile must not be empty"));
    }

    #[test]
    fn validate_rejects_generator_outside_password_bounds() {
        let config = VaultConfig {
            generator: GeneratorPolicy {
                min_length: 12,
                max_length: 30,
            },
            ..VaultConfig::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("must lie within"));
    }

    #[test]
    fn validate_rejects_inverted_password_bounds() {
        let config = VaultConfig {
            password: PasswordPolicy {
                min_length: 30,
                max_length: 10,
            },
            ..VaultConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn password_policy_counts_characters() {
        let policy = PasswordPolicy::default();
        assert!(policy.check("short").is_err());
        assert!(policy.check("exactly8").is_ok());
        assert!(policy.check(&"x".repeat(25)).is_ok());
        assert!(policy.check(&"x".repeat(26)).is_err());
        // 8 characters, 16 bytes.
        assert!(policy.check("åååååååå").is_ok());
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_string(&VaultConfig::default()).unwrap();
        assert!(json.contains("dataFile"));
        assert!(json.contains("keyFile"));
        assert!(json.contains("minLength"));
        assert!(!json.contains("data_file"));
    }
}

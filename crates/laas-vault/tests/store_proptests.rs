#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for the CSV record store.

use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use laas_crypto_core::CipherBox;
use laas_vault::{Record, RecordStore, VaultStore};
use proptest::prelude::*;

const PROP_KEY: [u8; 32] = [0x42; 32];

fn timestamp() -> impl Strategy<Value = Option<NaiveDateTime>> {
    proptest::option::of(
        (1970i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
            |(y, mo, d, h, mi, s)| {
                NaiveDate::from_ymd_opt(y, mo, d)
                    .and_then(|date| date.and_hms_opt(h, mi, s))
                    .unwrap()
            },
        ),
    )
}

/// Platform names with the characters CSV has to quote.
fn platform() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ,\"'æøå.-]{1,16}"
}

fn entries() -> impl Strategy<Value = Vec<(String, String, String, Option<NaiveDateTime>)>> {
    prop::collection::vec(
        (platform(), "\\PC{0,16}", "[ -~]{8,25}", timestamp()),
        0..8,
    )
}

fn build_store(
    cipher: &CipherBox,
    entries: Vec<(String, String, String, Option<NaiveDateTime>)>,
) -> VaultStore {
    let mut store = VaultStore::new();
    for (platform, username, password, timestamp) in entries {
        store.insert(Record {
            platform,
            username,
            encrypted_password: cipher.encrypt(&password).unwrap(),
            timestamp,
            unparsed_date: None,
        });
    }
    store
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// save -> load -> save reproduces the store and the file byte for byte.
    #[test]
    fn reload_is_idempotent(entries in entries()) {
        let dir = tempfile::tempdir().unwrap();
        let key_path = dir.path().join("secret.key");
        fs::write(&key_path, PROP_KEY).unwrap();
        let records = RecordStore::new(dir.path().join("passwords.csv"), &key_path);

        let cipher = CipherBox::new(&PROP_KEY).unwrap();
        let store = build_store(&cipher, entries);

        records.save(&store).unwrap();
        let first_file = fs::read(records.path()).unwrap();
        let loaded = records.load().unwrap();
        prop_assert_eq!(&loaded, &store);

        records.save(&loaded).unwrap();
        prop_assert_eq!(fs::read(records.path()).unwrap(), first_file);
        prop_assert_eq!(records.load().unwrap(), store);
    }
}

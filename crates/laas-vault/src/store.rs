//! Record storage — the in-memory [`VaultStore`] and its CSV mirror.
//!
//! The data file is loaded once and rewritten whole on every save; there is
//! no append path and no merge with what is already on disk.
//!
//! File layout:
//!
//! ```text
//! platform,username,encrypted_password,date
//! GitHub,octocat,AZx0...==,2025-04-26 14:03:11
//! ```
//!
//! `encrypted_password` is the [`SealedData`] wire format in URL-safe base64.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use data_encoding::BASE64URL;
use laas_crypto_core::SealedData;

use crate::error::VaultError;

/// `date` column format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header row of the data file.
pub const HEADER: [&str; 4] = ["platform", "username", "encrypted_password", "date"];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One platform's stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Unique, non-empty platform name (case preserved).
    pub platform: String,
    pub username: String,
    /// Always produced by `CipherBox::encrypt`.
    pub encrypted_password: SealedData,
    /// Creation or last-write time; `None` if the file had no usable date.
    pub timestamp: Option<NaiveDateTime>,
    /// Date cell text that did not parse, written back as is on save.
    pub unparsed_date: Option<String>,
}

/// All records, keyed by exact platform name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultStore {
    records: BTreeMap<String, Record>,
}

impl VaultStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert or overwrite by platform, returning the replaced record.
    pub fn insert(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.platform.clone(), record)
    }

    pub fn remove(&mut self, platform: &str) -> Option<Record> {
        self.records.remove(platform)
    }

    /// Exact, case-sensitive lookup.
    #[must_use]
    pub fn get(&self, platform: &str) -> Option<&Record> {
        self.records.get(platform)
    }

    /// Exact lookup first, then the first case-insensitive match.
    #[must_use]
    pub fn find(&self, platform: &str) -> Option<&Record> {
        self.get(platform).or_else(|| {
            let wanted = platform.to_lowercase();
            self.records
                .values()
                .find(|r| r.platform.to_lowercase() == wanted)
        })
    }

    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Reads and rewrites the data file.
///
/// Holds the key file path only to refuse saves when the key is gone.
#[derive(Debug, Clone)]
pub struct RecordStore {
    data_path: PathBuf,
    key_path: PathBuf,
}

impl RecordStore {
    pub fn new(data_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            key_path: key_path.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.data_path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.data_path.exists()
    }

    /// Load every well-formed row. Malformed rows are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the file exists but cannot be read.
    pub fn load(&self) -> Result<VaultStore, VaultError> {
        let file = match File::open(&self.data_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(VaultStore::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let columns = Columns::locate(reader.headers()?);

        let mut store = VaultStore::new();
        let mut skipped = 0usize;
        for (row, result) in reader.records().enumerate() {
            let parsed = match result {
                Ok(fields) => columns.parse(&fields),
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => Err(e.to_string()),
            };
            match parsed {
                Ok(record) => {
                    store.insert(record);
                }
                Err(reason) => {
                    skipped = skipped.saturating_add(1);
                    tracing::warn!(row = row.saturating_add(1), "skipping malformed row: {reason}");
                }
            }
        }

        tracing::debug!(
            path = %self.data_path.display(),
            records = store.len(),
            skipped,
            "loaded vault records"
        );
        Ok(store)
    }

    /// Rewrite the whole data file from `store`.
    ///
    /// Writes to a sibling `.tmp` file, then renames it over the data file.
    ///
    /// # Errors
    ///
    /// - [`VaultError::MissingKey`] if the key file does not exist (nothing is written)
    /// - [`VaultError::Io`] if writing or renaming fails
    pub fn save(&self, store: &VaultStore) -> Result<(), VaultError> {
        if !self.key_path.exists() {
            return Err(VaultError::MissingKey(self.key_path.clone()));
        }

        let tmp = self.tmp_path();
        if let Err(e) = write_csv(&tmp, store) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        fs::rename(&tmp, &self.data_path)?;

        tracing::debug!(
            path = %self.data_path.display(),
            records = store.len(),
            "saved vault records"
        );
        Ok(())
    }

    /// Delete the data file. Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the file exists but cannot be removed.
    pub fn remove(&self) -> Result<bool, VaultError> {
        match fs::remove_file(&self.data_path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.data_path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn write_csv(path: &Path, store: &VaultStore) -> Result<(), VaultError> {
    let file = File::create(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(HEADER)?;
    for record in store.iter() {
        let ciphertext = BASE64URL.encode(&record.encrypted_password.to_bytes());
        let date = match (&record.timestamp, &record.unparsed_date) {
            (Some(ts), _) => ts.format(TIMESTAMP_FORMAT).to_string(),
            (None, Some(raw)) => raw.clone(),
            (None, None) => String::new(),
        };
        writer.write_record([
            record.platform.as_str(),
            record.username.as_str(),
            ciphertext.as_str(),
            date.as_str(),
        ])?;
    }
    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| io::Error::new(e.error().kind(), e.to_string()))?;
    file.sync_all()?;
    Ok(())
}

/// Column positions resolved from the header row, so column order on disk
/// does not matter.
struct Columns {
    platform: Option<usize>,
    username: Option<usize>,
    ciphertext: Option<usize>,
    date: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Self {
            platform: find(HEADER[0]),
            username: find(HEADER[1]),
            ciphertext: find(HEADER[2]),
            date: find(HEADER[3]),
        }
    }

    fn field<'r>(fields: &'r csv::StringRecord, index: Option<usize>) -> Option<&'r str> {
        index.and_then(|i| fields.get(i))
    }

    fn parse(&self, fields: &csv::StringRecord) -> Result<Record, String> {
        let platform = Self::field(fields, self.platform)
            .filter(|p| !p.is_empty())
            .ok_or("missing platform")?;
        let encoded = Self::field(fields, self.ciphertext)
            .filter(|c| !c.is_empty())
            .ok_or("missing encrypted_password")?;

        let blob = BASE64URL
            .decode(encoded.as_bytes())
            .map_err(|e| format!("encrypted_password is not base64: {e}"))?;
        let encrypted_password = SealedData::from_bytes(&blob).map_err(|e| e.to_string())?;

        let username = Self::field(fields, self.username).unwrap_or_default();
        let (timestamp, unparsed_date) = match Self::field(fields, self.date) {
            None | Some("") => (None, None),
            Some(raw) => match NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
                Ok(ts) => (Some(ts), None),
                Err(_) => {
                    tracing::warn!(platform, "keeping unparsable date {raw:?} as text");
                    (None, Some(raw.to_owned()))
                }
            },
        };

        Ok(Record {
            platform: platform.to_owned(),
            username: username.to_owned(),
            encrypted_password,
            timestamp,
            unparsed_date,
        })
    }
}

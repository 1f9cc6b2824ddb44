//! Snapshot persistence for the stores.
//!
//! Each store is saved as one named record holding its whole state, wrapped
//! in a `{"version": N, "state": ...}` envelope. Records go through a
//! `SnapshotBackend`, a plain key-value substrate: a directory of JSON files
//! on disk, or a map in memory.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::model::{Contact, Interaction};
use crate::query::ContactFilters;

/// Record holding contacts and the active filters.
pub const CONTACT_RECORD: &str = "contact-store";

/// Record holding interactions.
pub const INTERACTION_RECORD: &str = "interaction-store";

/// Envelope version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Saved state of a `ContactStore`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSnapshot {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub filters: ContactFilters,
}

/// Borrowed form of `ContactSnapshot`, so saving doesn't clone the store.
#[derive(Debug, Serialize)]
pub struct ContactSnapshotRef<'a> {
    pub contacts: &'a [Contact],
    pub filters: &'a ContactFilters,
}

/// Saved state of an `InteractionStore`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSnapshot {
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// Borrowed form of `InteractionSnapshot`.
#[derive(Debug, Serialize)]
pub struct InteractionSnapshotRef<'a> {
    pub interactions: &'a [Interaction],
}

#[derive(Serialize)]
struct EnvelopeOut<'a, T> {
    version: u32,
    state: &'a T,
}

#[derive(Deserialize)]
struct EnvelopeHeader {
    version: u32,
}

#[derive(Deserialize)]
struct EnvelopeIn<T> {
    state: T,
}

/// Serialize `state` into a versioned envelope.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn encode<T: Serialize>(state: &T) -> Result<String> {
    Ok(serde_json::to_string(&EnvelopeOut {
        version: SNAPSHOT_VERSION,
        state,
    })?)
}

/// Parse a versioned envelope read from `record`.
///
/// # Errors
///
/// Returns `UnsupportedSnapshotVersion` for envelopes newer than this build,
/// or `SnapshotParse` if the payload is not a valid envelope.
pub fn decode<T: DeserializeOwned>(record: &str, payload: &str) -> Result<T> {
    let parse_err = |e: serde_json::Error| TrackerError::SnapshotParse {
        record: record.to_string(),
        reason: e.to_string(),
    };

    let header: EnvelopeHeader = serde_json::from_str(payload).map_err(parse_err)?;
    if header.version > SNAPSHOT_VERSION {
        return Err(TrackerError::UnsupportedSnapshotVersion {
            record: record.to_string(),
            found: header.version,
            supported: SNAPSHOT_VERSION,
        });
    }

    let envelope: EnvelopeIn<T> = serde_json::from_str(payload).map_err(parse_err)?;
    Ok(envelope.state)
}

/// Durable key-value substrate for snapshot records.
pub trait SnapshotBackend: Send + Sync {
    /// Read a record. A record that was never written is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read.
    fn load(&self, record: &str) -> Result<Option<String>>;

    /// Replace a record's contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the write does not complete.
    fn store(&mut self, record: &str, payload: &str) -> Result<()>;
}

/// One `<record>.json` file per record inside a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn record_path(&self, record: &str) -> PathBuf {
        self.dir.join(format!("{record}.json"))
    }
}

impl SnapshotBackend for FileBackend {
    fn load(&self, record: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.record_path(record)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TrackerError::Io(e)),
        }
    }

    /// Write-to-temp + rename, so a crash never leaves a half-written record.
    fn store(&mut self, record: &str, payload: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.record_path(record);
        let tmp_path = path.with_extension("json.tmp");

        let written = write_and_replace(&tmp_path, &path, payload);
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written
    }
}

fn write_and_replace(tmp_path: &Path, path: &Path, payload: &str) -> Result<()> {
    let mut file = fs::File::create(tmp_path)?;
    file.write_all(payload.as_bytes())?;
    file.flush()?;
    drop(file);

    fs::rename(tmp_path, path)?;
    Ok(())
}

/// In-memory substrate; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    records: HashMap<String, String>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, record: &str) -> Option<&str> {
        self.records.get(record).map(String::as_str)
    }

    pub fn insert(&mut self, record: impl Into<String>, payload: impl Into<String>) {
        self.records.insert(record.into(), payload.into());
    }
}

impl SnapshotBackend for MemoryBackend {
    fn load(&self, record: &str) -> Result<Option<String>> {
        Ok(self.records.get(record).cloned())
    }

    fn store(&mut self, record: &str, payload: &str) -> Result<()> {
        self.records.insert(record.to_string(), payload.to_string());
        Ok(())
    }
}

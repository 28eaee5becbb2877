//! Filesystem snapshot store
//!
//! Saves collections under the date supplied by a [`Clock`] and loads them
//! back by (dataset, date).

use crate::clock::{Clock, SystemClock};
use crate::errors::{encoding_error, io_error, Result};
use crate::snapshot::atomic::exclusive_write;
use crate::snapshot::codec::{decode_collection, encode_collection};
use crate::snapshot::layout::{parse_snapshot_file_name, snapshot_path, validate_dataset_name};
use chrono::NaiveDate;
use snapdiff_core::errors::ExError;
use snapdiff_core::model::Collection;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What `save` wrote, decoded back from the bytes on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSnapshot {
    pub dataset: String,
    pub date: NaiveDate,
    pub path: PathBuf,
    pub collection: Collection,
}

/// Result of reading a snapshot, before degrading to a plain collection.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Collection),
    /// No snapshot was ever saved for that date
    Missing,
    /// A file exists but cannot be read or is not an array of records
    Corrupt { reason: String },
}

impl LoadOutcome {
    /// The loaded collection, or an empty one when missing or corrupt
    pub fn into_collection(self) -> Collection {
        match self {
            LoadOutcome::Loaded(collection) => collection,
            LoadOutcome::Missing | LoadOutcome::Corrupt { .. } => Collection::new(),
        }
    }
}

/// Date-addressed snapshot store rooted at a directory
pub struct SnapshotStore {
    root: PathBuf,
    clock: Box<dyn Clock>,
}

impl SnapshotStore {
    /// Store at `root` filing captures under the host's local date
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_clock(root, SystemClock)
    }

    pub fn with_clock(root: impl Into<PathBuf>, clock: impl Clock + 'static) -> Self {
        Self {
            root: root.into(),
            clock: Box::new(clock),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The date `save` would file a capture under right now
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Path of the snapshot for `dataset` on `date`
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: dataset name is not a single path segment
    pub fn snapshot_path(&self, dataset: &str, date: NaiveDate) -> Result<PathBuf> {
        validate_dataset_name(dataset).map_err(ExError::from)?;
        Ok(snapshot_path(&self.root, dataset, date))
    }

    /// Save `collection` as today's snapshot of `dataset`, replacing any
    /// snapshot already saved today.
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: dataset name is not a single path segment
    /// - `Encoding`: the collection could not be serialized
    /// - `Persistence`: the directory or file could not be created or written
    pub fn save(&self, dataset: &str, collection: &Collection) -> Result<StoredSnapshot> {
        let date = self.clock.today();
        let path = self.snapshot_path(dataset, date)?;

        let bytes = encode_collection(collection)
            .map_err(|e| encoding_error("save_snapshot", e).with_dataset(dataset))?;
        exclusive_write(&path, &bytes).map_err(|e| e.with_dataset(dataset))?;

        let stored = decode_collection(&bytes)
            .map_err(|e| encoding_error("save_snapshot", e).with_dataset(dataset))?;

        tracing::debug!(
            dataset,
            snapshot_date = %date,
            record_count = stored.len(),
            size_bytes = bytes.len(),
            path = %path.display(),
            "Saved snapshot"
        );

        Ok(StoredSnapshot {
            dataset: dataset.to_string(),
            date,
            path,
            collection: stored,
        })
    }

    /// Load the snapshot of `dataset` for `date`.
    ///
    /// Never fails: a missing or undecodable snapshot yields an empty
    /// collection, the latter with a warning. Use
    /// [`SnapshotStore::load_outcome`] to tell them apart.
    pub fn load(&self, dataset: &str, date: NaiveDate) -> Collection {
        let outcome = self.load_outcome(dataset, date);
        if let LoadOutcome::Corrupt { reason } = &outcome {
            tracing::warn!(
                dataset,
                snapshot_date = %date,
                reason = reason.as_str(),
                "Snapshot does not decode to a collection, treating as empty"
            );
        }
        outcome.into_collection()
    }

    /// Load the snapshot of `dataset` for `date`, keeping why it is empty.
    ///
    /// Callers own the reporting of a `Corrupt` outcome; some snapshot files
    /// are expected to need another reading (see `load_document`).
    pub fn load_outcome(&self, dataset: &str, date: NaiveDate) -> LoadOutcome {
        let bytes = match self.read_snapshot(dataset, date) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return LoadOutcome::Missing,
            Err(reason) => return LoadOutcome::Corrupt { reason },
        };

        match decode_collection(&bytes) {
            Ok(collection) => LoadOutcome::Loaded(collection),
            Err(e) => {
                tracing::debug!(
                    dataset,
                    snapshot_date = %date,
                    error = %e,
                    "Snapshot is not a bare collection"
                );
                LoadOutcome::Corrupt {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Load the snapshot file as a raw JSON document.
    ///
    /// Used for files holding a whole source envelope rather than a bare
    /// collection. Missing or undecodable files yield `Value::Null`.
    pub fn load_document(&self, dataset: &str, date: NaiveDate) -> serde_json::Value {
        match self.read_snapshot(dataset, date) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(
                    dataset,
                    snapshot_date = %date,
                    error = %e,
                    "Snapshot is not valid JSON"
                );
                serde_json::Value::Null
            }),
            Ok(None) | Err(_) => serde_json::Value::Null,
        }
    }

    /// Dates with a snapshot of `dataset`, ascending.
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: dataset name is not a single path segment
    /// - `Io`: the dataset directory exists but cannot be listed
    pub fn list_dates(&self, dataset: &str) -> Result<Vec<NaiveDate>> {
        validate_dataset_name(dataset).map_err(ExError::from)?;
        let dir = self.root.join(dataset);

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("list_snapshots", &dir, e).with_dataset(dataset)),
        };

        let mut dates: Vec<NaiveDate> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                parse_snapshot_file_name(dataset, &entry.file_name().to_string_lossy())
            })
            .collect();
        dates.sort();
        dates.dedup();
        Ok(dates)
    }

    /// Raw bytes of a snapshot; `Ok(None)` when absent, `Err` with a reason
    /// when present but unreadable or the name is invalid.
    fn read_snapshot(
        &self,
        dataset: &str,
        date: NaiveDate,
    ) -> std::result::Result<Option<Vec<u8>>, String> {
        let path = self.snapshot_path(dataset, date).map_err(|e| e.to_string())?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    dataset,
                    snapshot_date = %date,
                    "No snapshot for date"
                );
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(
                    dataset,
                    snapshot_date = %date,
                    error = %e,
                    "Snapshot could not be read, treating as empty"
                );
                Err(e.to_string())
            }
        }
    }
}

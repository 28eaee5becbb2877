//! Snapshot persistence layer.
//!
//! ## Responsibilities
//!
//! - Derive the file for a (dataset, date) pair
//! - Encode collections in the canonical snapshot form
//! - Write snapshots exclusively (no torn files, last writer wins)
//! - Load snapshots leniently (absent or corrupt → empty collection)
//! - List the dates a dataset has snapshots for
//!
//! ## Non-Responsibilities
//!
//! - Retrieving data from the source (handled by `snapdiff-engine`)
//! - Comparing snapshots (handled by `snapdiff-core`)

mod atomic;
pub mod codec;
pub mod fs_store;
pub mod layout;

pub use fs_store::{LoadOutcome, SnapshotStore, StoredSnapshot};
pub use layout::{parse_snapshot_file_name, snapshot_path, validate_dataset_name, DATE_FORMAT};

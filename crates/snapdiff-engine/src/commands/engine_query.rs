//! Read-only queries over the snapshot store.

#![allow(clippy::result_large_err)]

use crate::commands::compare::load_collection;
use chrono::NaiveDate;
use snapdiff_core::errors::Result;
use snapdiff_core::model::Collection;
use snapdiff_store::SnapshotStore;

/// Dates with a capture of `dataset`, oldest first
///
/// # Errors
///
/// - `InvalidInput`: dataset name is not a single path segment
/// - `Io`: the dataset directory cannot be listed
pub fn list_snapshots(dataset: &str, store: &SnapshotStore) -> Result<Vec<NaiveDate>> {
    store.list_dates(dataset)
}

/// The capture of `dataset` taken on `date`, empty when there is none
///
/// # Errors
///
/// - `InvalidInput`: dataset name is not a single path segment
pub fn show_snapshot(
    dataset: &str,
    date: NaiveDate,
    collection_field: Option<&str>,
    store: &SnapshotStore,
) -> Result<Collection> {
    store.snapshot_path(dataset, date)?;
    Ok(load_collection(store, dataset, date, collection_field))
}

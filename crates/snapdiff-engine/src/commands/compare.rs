//! Compare two stored captures of a dataset.

#![allow(clippy::result_large_err)]

use chrono::NaiveDate;
use snapdiff_core::diff::{compare as diff_collections, Changelog};
use snapdiff_core::errors::Result;
use snapdiff_core::model::Collection;
use snapdiff_core::payload::extract_collection;
use snapdiff_store::{LoadOutcome, SnapshotStore};

/// Changelog turning the `from` capture into the `to` capture.
///
/// Missing or unreadable captures count as empty.
///
/// # Errors
///
/// - `InvalidInput`: dataset name is not a single path segment
pub fn compare(
    dataset: &str,
    from: NaiveDate,
    to: NaiveDate,
    key_field: &str,
    collection_field: Option<&str>,
    store: &SnapshotStore,
) -> Result<Changelog> {
    store.snapshot_path(dataset, from)?;

    let old = load_collection(store, dataset, from, collection_field);
    let new = load_collection(store, dataset, to, collection_field);
    Ok(diff_collections(&old, &new, key_field))
}

/// Load a capture, reading files written as a source envelope
/// (`{"articles": [...]}`) through `collection_field`.
///
/// Only a file that is neither a collection nor a readable envelope is
/// reported.
pub(crate) fn load_collection(
    store: &SnapshotStore,
    dataset: &str,
    date: NaiveDate,
    collection_field: Option<&str>,
) -> Collection {
    let reason = match store.load_outcome(dataset, date) {
        LoadOutcome::Loaded(collection) => return collection,
        LoadOutcome::Missing => return Collection::new(),
        LoadOutcome::Corrupt { reason } => reason,
    };

    if let Some(field) = collection_field {
        match extract_collection(store.load_document(dataset, date), Some(field)) {
            Ok(collection) => {
                tracing::debug!(
                    dataset,
                    snapshot_date = %date,
                    collection_field = field,
                    "Read snapshot through its envelope field"
                );
                return collection;
            }
            Err(e) => tracing::warn!(
                dataset,
                snapshot_date = %date,
                reason = reason.as_str(),
                envelope_error = %e,
                "Snapshot is neither a collection nor an envelope, treating as empty"
            ),
        }
    } else {
        tracing::warn!(
            dataset,
            snapshot_date = %date,
            reason = reason.as_str(),
            "Snapshot does not decode to a collection, treating as empty"
        );
    }
    Collection::new()
}

//! Capture: fetch a dataset from its source and file it under today's date.

#![allow(clippy::result_large_err)]

use crate::config::DatasetConfig;
use crate::fetcher::Fetcher;
use snapdiff_core::errors::{ExError, Result};
use snapdiff_core::payload::extract_collection;
use snapdiff_store::{SnapshotStore, StoredSnapshot};

/// Fetch `dataset`, unwrap its records and save them for the store's today.
///
/// # Errors
///
/// - whatever the fetcher reports (`InvalidInput`, `ExternalService`, `Encoding`)
/// - `Contract`: the payload does not hold an array of records
/// - `Persistence` / `Encoding`: the snapshot could not be written
pub fn capture(
    dataset: &str,
    settings: &DatasetConfig,
    store: &SnapshotStore,
    fetcher: &dyn Fetcher,
) -> Result<StoredSnapshot> {
    let document = fetcher.fetch(dataset)?;
    let collection = extract_collection(document, settings.collection_field.as_deref())
        .map_err(|e| ExError::from(e).with_op("capture").with_dataset(dataset))?;
    store.save(dataset, &collection)
}

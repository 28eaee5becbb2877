//! On-disk layout of snapshots
//!
//! A snapshot of dataset `N` taken on date `D` lives at
//! `<root>/N/N_D.json`, with `D` formatted `YYYY-MM-DD`.

use chrono::NaiveDate;
use snapdiff_core::errors::SnapDiffError;
use std::path::{Path, PathBuf};

/// Date format used in snapshot file names
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const EXTENSION: &str = ".json";

/// Reject names that would escape or nest below the store root.
///
/// # Errors
///
/// - `InvalidDatasetName`: empty, `.`/`..`, or containing a path separator
pub fn validate_dataset_name(name: &str) -> Result<(), SnapDiffError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if bad {
        return Err(SnapDiffError::InvalidDatasetName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Compute the snapshot path for a dataset and date
///
/// For dataset "article" on 2025-02-14, returns
/// "<root>/article/article_2025-02-14.json"
pub fn snapshot_path(root: &Path, dataset: &str, date: NaiveDate) -> PathBuf {
    root.join(dataset)
        .join(format!("{}_{}{}", dataset, date.format(DATE_FORMAT), EXTENSION))
}

/// Date encoded in a snapshot file name of `dataset`, if it is one.
pub fn parse_snapshot_file_name(dataset: &str, file_name: &str) -> Option<NaiveDate> {
    let stem = file_name.strip_suffix(EXTENSION)?;
    let date = stem.strip_prefix(dataset)?.strip_prefix('_')?;
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

//! Exclusive write primitive
//!
//! Each writer streams into its own uniquely named temp file next to the
//! target, then renames it over the target. Readers only ever see a complete
//! previous or complete new file; concurrent writers never interleave and
//! the last rename wins.

use crate::errors::{persistence_error, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Write bytes to `target_path`, creating missing parent directories
pub fn exclusive_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| persistence_error("create_snapshot_dir", parent, e))?;
    }

    let temp_path = temp_path_for(target_path);

    if let Err(err) = write_new_file(&temp_path, content) {
        fs::remove_file(&temp_path).ok();
        return Err(persistence_error("write_snapshot_temp", &temp_path, err));
    }

    if let Err(err) = fs::rename(&temp_path, target_path) {
        fs::remove_file(&temp_path).ok();
        return Err(persistence_error("rename_snapshot_temp", target_path, err));
    }

    Ok(())
}

fn write_new_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    // create_new: a temp name is never shared between writers
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(content)?;
    file.sync_all()
}

fn temp_path_for(target_path: &Path) -> PathBuf {
    let file_name = target_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target_path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exclusive_write_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("stock").join("stock_2025-02-14.json");

        exclusive_write(&target, b"[]").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"[]");
    }

    #[test]
    fn test_exclusive_write_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a.json");

        exclusive_write(&target, b"[1]").unwrap();
        exclusive_write(&target, b"[2]").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"[2]");
    }

    #[test]
    fn test_no_tmp_files_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a.json");

        exclusive_write(&target, b"clean").unwrap();

        let tmp_count = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(tmp_count, 0);
    }

    #[test]
    fn test_temp_names_are_unique() {
        let target = Path::new("/x/a.json");
        assert_ne!(temp_path_for(target), temp_path_for(target));
    }

    #[test]
    fn test_parent_is_a_file_fails_with_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("stock");
        fs::write(&blocker, b"not a dir").unwrap();

        let err = exclusive_write(&blocker.join("stock_2025-02-14.json"), b"[]").unwrap_err();
        assert_eq!(err.code(), "ERR_PERSISTENCE");
    }
}

//! Error handling for snapdiff-store
//!
//! Wraps snapdiff-core ExError with store-specific helpers

use snapdiff_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// The snapshot destination could not be created or written
pub fn persistence_error(op: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op(op)
        .with_message(format!("{}: {}", path.display(), err))
}

/// A collection could not be encoded, or written bytes did not decode back
pub fn encoding_error(op: &str, err: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Encoding)
        .with_op(op)
        .with_message(err.to_string())
}

/// Create an IO error for reads that are not covered by the lenient load policy
pub fn io_error(op: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(op)
        .with_message(format!("{}: {}", path.display(), err))
}

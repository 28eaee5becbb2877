//! snapdiff core - dataset model and keyed diff engine
//!
//! This crate provides the pure, I/O-free parts of snapdiff:
//! - Record and Collection models for semi-structured datasets
//! - The keyed, recursive changelog computation (add / update / delete)
//! - Payload decoding and envelope extraction
//! - Tabular rendering of a collection
//! - The structured error facility and the logging facility

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod payload;
pub mod table;

// Used by the logging macros so callers need not depend on snapdiff-core-types
pub use snapdiff_core_types::schema;

// Re-export commonly used types
pub use diff::{compare, ChangeAction, ChangeEntry, Changelog};
pub use errors::{ExError, ExErrorKind, Result, SnapDiffError};
pub use model::{Collection, Record};

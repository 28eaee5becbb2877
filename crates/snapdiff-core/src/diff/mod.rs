//! Dataset diff engine.
//!
//! Compares two collections correlated by a key field and produces an
//! ordered changelog of added, updated and deleted records.
//!
//! ## Entry point
//!
//! ```
//! use snapdiff_core::diff::compare;
//! use snapdiff_core::model::Collection;
//!
//! let old: Collection = serde_json::from_str(r#"[{"id":1,"price":10}]"#).unwrap();
//! let new: Collection = serde_json::from_str(r#"[{"id":1,"price":12}]"#).unwrap();
//! let changelog = compare(&old, &new, "id");
//! assert_eq!(changelog.stats().updated, 1);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: output order follows collection order, never hash order.
//! - **Lenient keys**: records without a key value are ignored, not rejected.
//! - **Asymmetry**: only fields of the old record are inspected when deciding
//!   whether a record was updated.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{compare, compare_values, DEFAULT_KEY_FIELD};
pub use human_summary::render_summary;
pub use model::{ChangeAction, ChangeEntry, Changelog, ChangelogStats, FieldDifference};

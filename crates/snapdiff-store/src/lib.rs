//! snapdiff store - dated snapshot persistence
//!
//! Provides:
//! - Date-addressed snapshot files (`<root>/<dataset>/<dataset>_<YYYY-MM-DD>.json`)
//! - Exclusive, atomic snapshot writes
//! - Lenient loads that degrade to an empty collection
//! - An injectable clock for "today"

pub mod clock;
pub mod errors;
pub mod snapshot;

// Re-export key types
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::Result;
pub use snapshot::{LoadOutcome, SnapshotStore, StoredSnapshot};

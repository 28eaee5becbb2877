//! Dataset data model: records and collections.

pub mod record;

pub use record::{Collection, Record};

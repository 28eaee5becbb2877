//! snapdiff engine - orchestration layer
//!
//! Coordinates the source fetcher, the snapshot store and the diff engine
//! behind a small set of commands, and owns runtime configuration.

pub mod commands;
pub mod config;
pub mod fetcher;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use config::{DatasetConfig, SnapDiffConfig};
pub use fetcher::{DirectoryFetcher, Fetcher, SourceConfig};

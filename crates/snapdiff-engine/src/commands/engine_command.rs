//! Engine-level commands and their dispatcher.

#![allow(clippy::result_large_err)]

use crate::commands::capture::capture;
use crate::commands::compare::compare;
use crate::commands::engine_query::{list_snapshots, show_snapshot};
use crate::config::SnapDiffConfig;
use crate::fetcher::Fetcher;
use chrono::NaiveDate;
use snapdiff_core::diff::Changelog;
use snapdiff_core::errors::Result;
use snapdiff_core::model::Collection;
use snapdiff_core::{log_op_end, log_op_error, log_op_start};
use snapdiff_core_types::RequestId;
use snapdiff_store::{SnapshotStore, StoredSnapshot};
use std::time::Instant;

/// Commands the engine can run against a store.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    /// Fetch the dataset and save it under today's date.
    Capture { dataset: String },
    /// Diff two captures. `key_field` falls back to the dataset's configured key.
    Compare {
        dataset: String,
        from: NaiveDate,
        to: NaiveDate,
        key_field: Option<String>,
    },
    ListSnapshots { dataset: String },
    Show { dataset: String, date: NaiveDate },
}

/// Result of applying an engine command.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommandResult {
    Captured(StoredSnapshot),
    Compared(Changelog),
    Listed(Vec<NaiveDate>),
    Shown(Collection),
}

impl EngineCommand {
    pub fn op_name(&self) -> &'static str {
        match self {
            EngineCommand::Capture { .. } => "capture",
            EngineCommand::Compare { .. } => "compare",
            EngineCommand::ListSnapshots { .. } => "list_snapshots",
            EngineCommand::Show { .. } => "show_snapshot",
        }
    }

    pub fn dataset(&self) -> &str {
        match self {
            EngineCommand::Capture { dataset }
            | EngineCommand::Compare { dataset, .. }
            | EngineCommand::ListSnapshots { dataset }
            | EngineCommand::Show { dataset, .. } => dataset,
        }
    }
}

impl EngineCommandResult {
    /// Records captured or shown, changes found, or dates listed
    pub fn item_count(&self) -> usize {
        match self {
            EngineCommandResult::Captured(stored) => stored.collection.len(),
            EngineCommandResult::Compared(changelog) => changelog.len(),
            EngineCommandResult::Listed(dates) => dates.len(),
            EngineCommandResult::Shown(collection) => collection.len(),
        }
    }
}

/// Apply an engine command.
///
/// Every call is tagged with a fresh request id, which appears on the
/// start/end log events and on any returned error.
///
/// # Errors
///
/// Errors of the underlying command, carrying the request id and dataset.
pub fn apply_engine_command(
    cmd: EngineCommand,
    config: &SnapDiffConfig,
    store: &SnapshotStore,
    fetcher: &dyn Fetcher,
) -> Result<EngineCommandResult> {
    let request_id = RequestId::new();
    let op = cmd.op_name();
    let dataset = cmd.dataset().to_string();
    let started = Instant::now();

    log_op_start!(
        op,
        dataset = dataset.as_str(),
        request_id = request_id.as_str()
    );

    match dispatch(cmd, config, store, fetcher) {
        Ok(result) => {
            let duration_ms = started.elapsed().as_millis() as u64;
            let item_count = result.item_count() as u64;
            log_op_end!(
                op,
                duration_ms = duration_ms,
                dataset = dataset.as_str(),
                request_id = request_id.as_str(),
                item_count = item_count
            );
            Ok(result)
        }
        Err(err) => {
            let duration_ms = started.elapsed().as_millis() as u64;
            let mut err = err.with_request_id(request_id.clone());
            if err.dataset().is_none() {
                err = err.with_dataset(dataset.as_str());
            }
            log_op_error!(
                op,
                err,
                duration_ms = duration_ms,
                dataset = dataset.as_str(),
                request_id = request_id.as_str()
            );
            Err(err)
        }
    }
}

fn dispatch(
    cmd: EngineCommand,
    config: &SnapDiffConfig,
    store: &SnapshotStore,
    fetcher: &dyn Fetcher,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Capture { dataset } => {
            let settings = config.dataset(&dataset);
            capture(&dataset, &settings, store, fetcher).map(EngineCommandResult::Captured)
        }
        EngineCommand::Compare {
            dataset,
            from,
            to,
            key_field,
        } => {
            let settings = config.dataset(&dataset);
            let key_field = key_field.unwrap_or(settings.key_field);
            compare(
                &dataset,
                from,
                to,
                &key_field,
                settings.collection_field.as_deref(),
                store,
            )
            .map(EngineCommandResult::Compared)
        }
        EngineCommand::ListSnapshots { dataset } => {
            list_snapshots(&dataset, store).map(EngineCommandResult::Listed)
        }
        EngineCommand::Show { dataset, date } => {
            let settings = config.dataset(&dataset);
            show_snapshot(
                &dataset,
                date,
                settings.collection_field.as_deref(),
                store,
            )
            .map(EngineCommandResult::Shown)
        }
    }
}

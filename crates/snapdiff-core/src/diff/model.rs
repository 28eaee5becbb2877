//! Changelog output types.

use crate::model::Record;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the synthetic field carrying the action in a serialized entry
pub const ACTION_FIELD: &str = "action";

/// Classification of one changed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    /// Key present only in the new collection
    Add,
    /// Key present on both sides with at least one field difference
    Update,
    /// Key present only in the old collection
    Delete,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Add => "add",
            ChangeAction::Update => "update",
            ChangeAction::Delete => "delete",
        }
    }
}

impl std::fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field that differs between the old and new version of a record.
///
/// `path` drills into nested records; a field removed from the new record
/// has `new == Value::Null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDifference {
    pub path: Vec<String>,
    pub old: Value,
    pub new: Value,
}

impl FieldDifference {
    /// Dotted form of the path, e.g. `price.amount`
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

/// One reported difference.
///
/// Serializes as the record's own fields followed by `action`; any field
/// already named `action` in the record is replaced. `differences` is only
/// populated for updates and is not part of the serialized form.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEntry {
    pub action: ChangeAction,
    pub record: Record,
    pub differences: Vec<FieldDifference>,
}

impl ChangeEntry {
    pub fn added(record: Record) -> Self {
        Self {
            action: ChangeAction::Add,
            record,
            differences: Vec::new(),
        }
    }

    pub fn deleted(record: Record) -> Self {
        Self {
            action: ChangeAction::Delete,
            record,
            differences: Vec::new(),
        }
    }

    pub fn updated(record: Record, differences: Vec<FieldDifference>) -> Self {
        Self {
            action: ChangeAction::Update,
            record,
            differences,
        }
    }

    /// The serialized shape as a record: fields plus `action`
    pub fn to_record(&self) -> Record {
        let mut out: Record = self
            .record
            .iter()
            .filter(|(name, _)| name.as_str() != ACTION_FIELD)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        out.insert(
            ACTION_FIELD.to_string(),
            Value::String(self.action.as_str().to_string()),
        );
        out
    }
}

impl Serialize for ChangeEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self
            .record
            .iter()
            .filter(|(name, _)| name.as_str() != ACTION_FIELD);
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in fields {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(ACTION_FIELD, self.action.as_str())?;
        map.end()
    }
}

/// Per-action counts of a changelog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogStats {
    pub added: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl ChangelogStats {
    pub fn total(&self) -> usize {
        self.added + self.updated + self.deleted
    }
}

/// Ordered result of a comparison: deletes and updates in old-collection
/// order, then adds in new-collection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Changelog {
    entries: Vec<ChangeEntry>,
}

impl Changelog {
    pub fn new(entries: Vec<ChangeEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ChangeEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeEntry> {
        self.entries.iter()
    }

    pub fn stats(&self) -> ChangelogStats {
        self.entries
            .iter()
            .fold(ChangelogStats::default(), |mut stats, entry| {
                match entry.action {
                    ChangeAction::Add => stats.added += 1,
                    ChangeAction::Update => stats.updated += 1,
                    ChangeAction::Delete => stats.deleted += 1,
                }
                stats
            })
    }

    /// Entries with the given action, in changelog order
    pub fn with_action(&self, action: ChangeAction) -> impl Iterator<Item = &ChangeEntry> {
        self.entries.iter().filter(move |e| e.action == action)
    }
}

impl<'a> IntoIterator for &'a Changelog {
    type Item = &'a ChangeEntry;
    type IntoIter = std::slice::Iter<'a, ChangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//! Plain-text summary renderer for changelogs.

use crate::diff::model::{ChangeAction, ChangeEntry, Changelog};
use serde_json::Value;

/// Render a human-readable Markdown summary of a [`Changelog`].
///
/// Each entry is listed by its key value; updates also list the changed
/// field paths with old and new values.
pub fn render_summary(changelog: &Changelog, key_field: &str) -> String {
    let stats = changelog.stats();
    let mut out = String::new();

    out.push_str("## Changelog\n\n");
    out.push_str(&format!(
        "**Added**: {}  \n**Updated**: {}  \n**Deleted**: {}\n",
        stats.added, stats.updated, stats.deleted
    ));

    if changelog.is_empty() {
        out.push_str("\nNo changes.\n");
        return out;
    }

    for (action, title) in [
        (ChangeAction::Add, "Added"),
        (ChangeAction::Update, "Updated"),
        (ChangeAction::Delete, "Deleted"),
    ] {
        let entries: Vec<&ChangeEntry> = changelog.with_action(action).collect();
        if entries.is_empty() {
            continue;
        }
        out.push_str(&format!("\n### {title}\n\n"));
        for entry in entries {
            out.push_str(&format!("- `{}`\n", key_label(entry, key_field)));
            for diff in &entry.differences {
                out.push_str(&format!(
                    "  - {}: {} -> {}\n",
                    diff.path_string(),
                    scalar_text(&diff.old),
                    scalar_text(&diff.new)
                ));
            }
        }
    }

    out
}

fn key_label(entry: &ChangeEntry, key_field: &str) -> String {
    entry
        .record
        .get(key_field)
        .map(scalar_text)
        .unwrap_or_else(|| "?".to_string())
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

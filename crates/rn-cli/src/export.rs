//! JSON snapshot of the fetched data next to the release notes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use rn_core::{IconMap, WorkItem};
use rn_notes::ParentGroups;
use serde::Serialize;

pub const TYPES_FILE: &str = "types.json";
pub const WORK_ITEMS_FILE: &str = "work_items.json";

#[derive(Debug, Serialize)]
struct TypeEntry<'a> {
    name: &'a str,
    icon: &'a str,
}

#[derive(Debug, Serialize)]
struct WorkItemsExport<'a> {
    generated_at: DateTime<Utc>,
    groups: Vec<GroupExport<'a>>,
}

#[derive(Debug, Serialize)]
struct GroupExport<'a> {
    parent_id: u64,
    items: &'a [WorkItem],
}

/// Write `types.json` and `work_items.json` into `folder`.
pub fn write_json(
    folder: &Path,
    icons: &IconMap,
    groups: &ParentGroups,
) -> anyhow::Result<Vec<PathBuf>> {
    let types: Vec<TypeEntry<'_>> = icons
        .iter()
        .map(|(name, icon)| TypeEntry { name, icon })
        .collect();
    let work_items = WorkItemsExport {
        generated_at: Utc::now(),
        groups: groups
            .iter()
            .map(|(parent_id, items)| GroupExport { parent_id, items })
            .collect(),
    };

    let types_path = folder.join(TYPES_FILE);
    write_pretty(&types_path, &types)?;
    let items_path = folder.join(WORK_ITEMS_FILE);
    write_pretty(&items_path, &work_items)?;

    tracing::debug!(folder = %folder.display(), "exported JSON snapshot");
    Ok(vec![types_path, items_path])
}

fn write_pretty<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Undo history: snapshots of tabs and groups taken before each grouping action
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::tab_data::{GroupColor, TabGroupInfo, TabInfo};

/// Oldest snapshots are discarded beyond this
pub const MAX_HISTORY_SIZE: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotTab {
    pub id: i32,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub group_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub id: String,
    pub timestamp: f64,
    pub tabs: Vec<SnapshotTab>,
    pub groups: Vec<TabGroupInfo>,
}

impl Snapshot {
    pub fn capture(tabs: &[TabInfo], groups: &[TabGroupInfo], timestamp: f64) -> Snapshot {
        Snapshot {
            id: Uuid::new_v4().to_string(),
            timestamp,
            tabs: tabs
                .iter()
                .map(|tab| SnapshotTab {
                    id: tab.id,
                    url: tab.url.clone(),
                    title: tab.title.clone(),
                    group_id: tab.group_id,
                })
                .collect(),
            groups: groups.to_vec(),
        }
    }
}

/// A group to recreate when undoing
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestoreGroup {
    pub title: String,
    pub color: GroupColor,
    pub tab_ids: Vec<i32>,
}

/// Stack of pre-action snapshots, newest last
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ActionHistory {
    snapshots: Vec<Snapshot>,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a snapshot, dropping the oldest beyond `MAX_HISTORY_SIZE`.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
        if self.snapshots.len() > MAX_HISTORY_SIZE {
            let excess = self.snapshots.len() - MAX_HISTORY_SIZE;
            self.snapshots.drain(..excess);
        }
    }

    /// Take the most recent snapshot off the stack.
    pub fn undo(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }
}

/// Work out which current tabs to regroup so the window looks like `snapshot`
///
/// Tab ids change across restarts, so tabs are matched by URL. Groups come back in
/// snapshot order; groups whose tabs are all gone, or that the snapshot does not
/// describe, are skipped.
pub fn restore_plan(snapshot: &Snapshot, current_tabs: &[TabInfo]) -> Vec<RestoreGroup> {
    let url_to_id: HashMap<&str, i32> = current_tabs
        .iter()
        .map(|tab| (tab.url.as_str(), tab.id))
        .collect();

    snapshot
        .groups
        .iter()
        .filter_map(|group| {
            let tab_ids: Vec<i32> = snapshot
                .tabs
                .iter()
                .filter(|tab| tab.group_id == Some(group.id))
                .filter_map(|tab| url_to_id.get(tab.url.as_str()).copied())
                .collect();

            if tab_ids.is_empty() {
                None
            } else {
                Some(RestoreGroup {
                    title: group.title.clone(),
                    color: group.color,
                    tab_ids,
                })
            }
        })
        .collect()
}

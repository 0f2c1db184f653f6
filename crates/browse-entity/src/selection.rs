//! Tri-state selection and per-kind selection maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::item::DashboardViewItemKind;

/// Checkbox state of a row as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    /// Neither the item nor any direct child is selected.
    Unselected,
    /// The item's own flag is set.
    Selected,
    /// The item's own flag is clear but a direct child's flag is set.
    Mixed,
}

/// Selection flags keyed by uid, one map per item kind.
///
/// A missing entry and `false` both mean unselected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTreeSelection {
    /// Folder flags.
    #[serde(default)]
    pub folder: BTreeMap<String, bool>,
    /// Dashboard flags.
    #[serde(default)]
    pub dashboard: BTreeMap<String, bool>,
    /// Panel flags.
    #[serde(default)]
    pub panel: BTreeMap<String, bool>,
}

impl DashboardTreeSelection {
    /// The flag map for one kind.
    pub fn by_kind(&self, kind: DashboardViewItemKind) -> &BTreeMap<String, bool> {
        match kind {
            DashboardViewItemKind::Folder => &self.folder,
            DashboardViewItemKind::Dashboard => &self.dashboard,
            DashboardViewItemKind::Panel => &self.panel,
        }
    }

    /// The mutable flag map for one kind.
    pub fn by_kind_mut(&mut self, kind: DashboardViewItemKind) -> &mut BTreeMap<String, bool> {
        match kind {
            DashboardViewItemKind::Folder => &mut self.folder,
            DashboardViewItemKind::Dashboard => &mut self.dashboard,
            DashboardViewItemKind::Panel => &mut self.panel,
        }
    }

    /// Whether the item's own flag is set.
    pub fn is_selected(&self, kind: DashboardViewItemKind, uid: &str) -> bool {
        self.by_kind(kind).get(uid).copied().unwrap_or(false)
    }

    /// Set the item's own flag.
    pub fn set(&mut self, kind: DashboardViewItemKind, uid: &str, is_selected: bool) {
        self.by_kind_mut(kind).insert(uid.to_string(), is_selected);
    }

    /// Whether any flag of any kind is set.
    pub fn has_any(&self) -> bool {
        [&self.folder, &self.dashboard, &self.panel]
            .into_iter()
            .any(|map| map.values().any(|selected| *selected))
    }
}

/// Selection reduced for bulk move/delete requests.
///
/// Panels are never part of bulk actions. Children of selected folders
/// are explicitly cleared because the backend cascades folder operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSelection {
    /// Folder flags.
    pub folder: BTreeMap<String, bool>,
    /// Dashboard flags.
    pub dashboard: BTreeMap<String, bool>,
}

impl ActionSelection {
    /// Uids of folders flagged for the action.
    pub fn folder_uids(&self) -> impl Iterator<Item = &str> {
        selected_keys(&self.folder)
    }

    /// Uids of dashboards flagged for the action.
    pub fn dashboard_uids(&self) -> impl Iterator<Item = &str> {
        selected_keys(&self.dashboard)
    }

    /// Whether nothing is flagged.
    pub fn is_empty(&self) -> bool {
        self.folder_uids().next().is_none() && self.dashboard_uids().next().is_none()
    }
}

fn selected_keys(map: &BTreeMap<String, bool>) -> impl Iterator<Item = &str> {
    map.iter()
        .filter(|(_, selected)| **selected)
        .map(|(uid, _)| uid.as_str())
}

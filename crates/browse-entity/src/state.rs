//! Normalized browse tree state.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::item::DashboardViewItem;
use crate::selection::DashboardTreeSelection;

/// Everything the browse view knows about the tree.
///
/// Items are stored flat: root items in order, and each loaded folder's
/// children keyed by the folder uid. A missing key in
/// `children_by_parent_uid` means the folder has not been loaded yet; an
/// empty vector means it was loaded and has no children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseDashboardsState {
    /// Items at the top level.
    pub root_items: Vec<DashboardViewItem>,
    /// Loaded children per folder.
    #[serde(rename = "childrenByParentUID")]
    pub children_by_parent_uid: BTreeMap<String, Vec<DashboardViewItem>>,
    /// Selection flags per kind.
    pub selected_items: DashboardTreeSelection,
    /// Folder expansion flags. Only folders open or close, so this is
    /// not split by kind.
    pub open_folders: HashMap<String, bool>,
}

impl BrowseDashboardsState {
    /// Loaded children of a folder, if the folder has been fetched.
    pub fn children_of(&self, folder_uid: &str) -> Option<&[DashboardViewItem]> {
        self.children_by_parent_uid
            .get(folder_uid)
            .map(Vec::as_slice)
    }

    /// Whether the folder is expanded.
    pub fn is_folder_open(&self, folder_uid: &str) -> bool {
        self.open_folders.get(folder_uid).copied().unwrap_or(false)
    }

    /// Find a loaded item by uid.
    ///
    /// This is a linear scan over the root items, then every loaded child
    /// list in folder uid order. When a uid is listed under two folders
    /// the first match in that order wins.
    pub fn find_item(&self, uid: &str) -> Option<&DashboardViewItem> {
        self.root_items
            .iter()
            .chain(self.children_by_parent_uid.values().flatten())
            .find(|item| item.uid == uid)
    }
}

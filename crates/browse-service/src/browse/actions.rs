//! Discrete state transitions for the browse tree.

use serde::{Deserialize, Serialize};

use browse_entity::{DashboardViewItem, ItemRef};

/// One user interaction or fetch completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BrowseAction {
    /// Children of a folder (or of the root, when `parent_uid` is None)
    /// finished loading.
    #[serde(rename_all = "camelCase")]
    FetchChildrenFulfilled {
        /// The folder that was fetched.
        parent_uid: Option<String>,
        /// Its children, in display order.
        children: Vec<DashboardViewItem>,
    },
    /// A folder was expanded or collapsed.
    #[serde(rename_all = "camelCase")]
    SetFolderOpenState {
        /// The folder.
        folder_uid: String,
        /// New expansion flag.
        is_open: bool,
    },
    /// A checkbox was toggled.
    #[serde(rename_all = "camelCase")]
    SetItemSelectionState {
        /// The toggled item.
        item: ItemRef,
        /// New selection flag.
        is_selected: bool,
    },
    /// The browse view was torn down.
    Reset,
}

impl BrowseAction {
    /// Whether applying this action can change the flattened tree.
    pub fn touches_tree(&self) -> bool {
        !matches!(self, Self::SetItemSelectionState { .. })
    }

    /// Short name for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchChildrenFulfilled { .. } => "fetch_children_fulfilled",
            Self::SetFolderOpenState { .. } => "set_folder_open_state",
            Self::SetItemSelectionState { .. } => "set_item_selection_state",
            Self::Reset => "reset",
        }
    }
}

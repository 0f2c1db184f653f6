//! Flattened tree rows for virtualized, indented rendering.

use serde::{Deserialize, Serialize};

use crate::item::DashboardViewItem;

/// Suffix appended to a folder uid to form its empty-folder placeholder uid.
pub const EMPTY_FOLDER_SUFFIX: &str = "-empty-folder";

/// Kind marker for rows that exist only in the rendered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiItemKind {
    /// Stand-in row for an open folder with no children.
    #[serde(rename = "ui-empty-folder")]
    EmptyFolder,
}

/// A row that is not backed by a real item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiItem {
    /// Always [`UiItemKind::EmptyFolder`].
    pub kind: UiItemKind,
    /// Derived from the owning folder's uid.
    pub uid: String,
}

/// The payload of a flattened tree row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeRowItem {
    /// A real folder, dashboard, or panel.
    Item(DashboardViewItem),
    /// A synthesized placeholder.
    Ui(UiItem),
}

impl TreeRowItem {
    /// Placeholder row for an open, loaded, empty folder.
    pub fn empty_folder(folder_uid: &str) -> Self {
        Self::Ui(UiItem {
            kind: UiItemKind::EmptyFolder,
            uid: format!("{folder_uid}{EMPTY_FOLDER_SUFFIX}"),
        })
    }

    /// Row identifier, stable across re-renders.
    pub fn uid(&self) -> &str {
        match self {
            Self::Item(item) => &item.uid,
            Self::Ui(ui) => &ui.uid,
        }
    }

    /// Kind label as it appears on the wire.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Item(item) => item.kind.as_str(),
            Self::Ui(_) => "ui-empty-folder",
        }
    }

    /// Whether this row is the empty-folder placeholder.
    pub fn is_empty_folder(&self) -> bool {
        matches!(self, Self::Ui(_))
    }
}

/// One visible row of the browse tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardsTreeItem {
    /// Row payload.
    pub item: TreeRowItem,
    /// The folder whose listing produced this row (None at the root).
    #[serde(rename = "parentUID")]
    pub parent_uid: Option<String>,
    /// Indentation depth, 0 for the top of the view.
    pub level: usize,
    /// Whether the row's folder is expanded.
    pub is_open: bool,
}

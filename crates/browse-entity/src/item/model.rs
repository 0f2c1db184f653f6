//! Browse item entity model.

use serde::{Deserialize, Serialize};

use super::kind::DashboardViewItemKind;

/// A folder, dashboard, or panel as returned by the item source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewItem {
    /// Item kind.
    pub kind: DashboardViewItemKind,
    /// Unique identifier across all items.
    pub uid: String,
    /// Display title.
    pub title: String,
    /// Link to the item, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Tags attached to the item.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Containing folder (None for root-level items).
    #[serde(default, rename = "parentUID", skip_serializing_if = "Option::is_none")]
    pub parent_uid: Option<String>,
    /// Title of the containing folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_title: Option<String>,
}

impl DashboardViewItem {
    /// Create a root-level item.
    pub fn new(
        kind: DashboardViewItemKind,
        uid: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            uid: uid.into(),
            title: title.into(),
            url: None,
            tags: Vec::new(),
            parent_uid: None,
            parent_title: None,
        }
    }

    /// Create a root-level folder.
    pub fn folder(uid: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(DashboardViewItemKind::Folder, uid, title)
    }

    /// Create a root-level dashboard.
    pub fn dashboard(uid: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(DashboardViewItemKind::Dashboard, uid, title)
    }

    /// Place the item inside a folder.
    pub fn in_folder(mut self, parent_uid: impl Into<String>) -> Self {
        self.parent_uid = Some(parent_uid.into());
        self
    }

    /// Whether this item is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// The identifying subset used by selection actions.
    pub fn to_ref(&self) -> ItemRef {
        ItemRef::from(self)
    }
}

/// The fields of an item that selection reconciliation needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    /// Item kind.
    pub kind: DashboardViewItemKind,
    /// Item identifier.
    pub uid: String,
    /// Containing folder (None for root-level items).
    #[serde(default, rename = "parentUID")]
    pub parent_uid: Option<String>,
}

impl ItemRef {
    /// Create a reference from its parts.
    pub fn new(
        kind: DashboardViewItemKind,
        uid: impl Into<String>,
        parent_uid: Option<String>,
    ) -> Self {
        Self {
            kind,
            uid: uid.into(),
            parent_uid,
        }
    }
}

impl From<&DashboardViewItem> for ItemRef {
    fn from(item: &DashboardViewItem) -> Self {
        Self {
            kind: item.kind,
            uid: item.uid.clone(),
            parent_uid: item.parent_uid.clone(),
        }
    }
}

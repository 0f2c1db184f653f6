//! Item kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of a browsable item.
///
/// Only folders have children. Panels appear in search results and carry
/// their own selection map, but are never part of bulk actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardViewItemKind {
    /// A folder that may contain dashboards and other folders.
    Folder,
    /// A dashboard.
    Dashboard,
    /// A panel inside a dashboard.
    Panel,
}

impl DashboardViewItemKind {
    /// Whether items of this kind can have children.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Dashboard => "dashboard",
            Self::Panel => "panel",
        }
    }
}

impl fmt::Display for DashboardViewItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DashboardViewItemKind {
    type Err = browse_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "folder" => Ok(Self::Folder),
            "dashboard" => Ok(Self::Dashboard),
            "panel" => Ok(Self::Panel),
            _ => Err(browse_core::AppError::validation(format!(
                "Invalid item kind: '{s}'. Expected one of: folder, dashboard, panel"
            ))),
        }
    }
}

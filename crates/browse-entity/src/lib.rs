//! # browse-entity
//!
//! Domain value types for the dashboard browser: the items shown in the
//! browse tree, the flattened rows derived from it, the per-kind
//! selection maps, and the normalized state those live in. All types
//! derive `Debug`, `Clone`, `Serialize` and `Deserialize`.

pub mod item;
pub mod selection;
pub mod state;
pub mod tree;

pub use item::{DashboardViewItem, DashboardViewItemKind, ItemRef};
pub use selection::{ActionSelection, DashboardTreeSelection, SelectionState};
pub use state::BrowseDashboardsState;
pub use tree::{DashboardsTreeItem, EMPTY_FOLDER_SUFFIX, TreeRowItem, UiItem, UiItemKind};

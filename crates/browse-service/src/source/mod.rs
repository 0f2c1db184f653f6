//! Collaborators the browse tree talks to: where items come from and
//! where bulk actions go.

pub mod memory;

use async_trait::async_trait;

use browse_core::result::AppResult;
use browse_entity::{ActionSelection, DashboardViewItem};

pub use memory::MemorySource;

/// Loads one level of the tree at a time.
#[async_trait]
pub trait ItemSource: Send + Sync + std::fmt::Debug + 'static {
    /// Return the children of `parent_uid` in display order, or the root
    /// items when `parent_uid` is None.
    async fn fetch_children(&self, parent_uid: Option<&str>) -> AppResult<Vec<DashboardViewItem>>;
}

/// Executes move and delete requests for a reduced selection.
#[async_trait]
pub trait BulkActionTarget: Send + Sync + std::fmt::Debug + 'static {
    /// Delete every flagged folder (with its contents) and dashboard.
    /// Returns the number of items removed.
    async fn delete_items(&self, selection: &ActionSelection) -> AppResult<u64>;

    /// Move every flagged folder and dashboard into `destination_uid`
    /// (the root when None). Returns the number of items moved.
    async fn move_items(
        &self,
        selection: &ActionSelection,
        destination_uid: Option<&str>,
    ) -> AppResult<u64>;
}

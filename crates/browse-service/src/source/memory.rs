//! In-memory item source backed by a flat item list.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use browse_core::error::AppError;
use browse_core::result::AppResult;
use browse_entity::{ActionSelection, DashboardViewItem};

use super::{BulkActionTarget, ItemSource};

/// Serves items from memory and applies bulk actions to them.
#[derive(Debug)]
pub struct MemorySource {
    /// All items, in display order within each folder.
    items: RwLock<Vec<DashboardViewItem>>,
    /// Number of `fetch_children` calls served.
    fetches: AtomicU64,
}

impl MemorySource {
    /// Create a source from a flat list of items.
    ///
    /// Uids must be unique, every parent must be a folder in the list, and
    /// parent chains must not loop.
    pub fn new(items: Vec<DashboardViewItem>) -> AppResult<Self> {
        validate_items(&items)?;

        Ok(Self {
            items: RwLock::new(items),
            fetches: AtomicU64::new(0),
        })
    }

    /// Load a source from a JSON array of items.
    pub async fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                browse_core::error::ErrorKind::Io,
                format!("Failed to read fixture '{}': {e}", path.display()),
                e,
            )
        })?;
        let items: Vec<DashboardViewItem> = serde_json::from_str(&raw)?;

        info!(path = %path.display(), count = items.len(), "Loaded item fixture");
        Self::new(items)
    }

    /// A copy of every item currently held.
    pub async fn items(&self) -> Vec<DashboardViewItem> {
        self.items.read().await.clone()
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemSource for MemorySource {
    async fn fetch_children(&self, parent_uid: Option<&str>) -> AppResult<Vec<DashboardViewItem>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let items = self.items.read().await;

        if let Some(uid) = parent_uid {
            require_folder(&items, uid)?;
        }

        let children: Vec<DashboardViewItem> = items
            .iter()
            .filter(|item| item.parent_uid.as_deref() == parent_uid)
            .cloned()
            .collect();

        debug!(?parent_uid, count = children.len(), "Served children");
        Ok(children)
    }
}

#[async_trait]
impl BulkActionTarget for MemorySource {
    async fn delete_items(&self, selection: &ActionSelection) -> AppResult<u64> {
        let mut items = self.items.write().await;

        let mut doomed: HashSet<String> = HashSet::new();
        for uid in selection.folder_uids().chain(selection.dashboard_uids()) {
            require_item(&items, uid)?;
            doomed.insert(uid.to_string());
        }

        // Pull in descendants until nothing new is found.
        loop {
            let before = doomed.len();
            for item in items.iter() {
                if item
                    .parent_uid
                    .as_ref()
                    .is_some_and(|parent| doomed.contains(parent))
                {
                    doomed.insert(item.uid.clone());
                }
            }
            if doomed.len() == before {
                break;
            }
        }

        let before = items.len();
        items.retain(|item| !doomed.contains(&item.uid));
        let removed = (before - items.len()) as u64;

        info!(removed, "Deleted items");
        Ok(removed)
    }

    async fn move_items(
        &self,
        selection: &ActionSelection,
        destination_uid: Option<&str>,
    ) -> AppResult<u64> {
        let mut items = self.items.write().await;

        let destination_title = match destination_uid {
            Some(uid) => Some(require_folder(&items, uid)?.title.clone()),
            None => None,
        };

        let moving: HashSet<&str> = selection
            .folder_uids()
            .chain(selection.dashboard_uids())
            .collect();
        for uid in &moving {
            require_item(&items, uid)?;
        }

        if let Some(destination) = destination_uid {
            for folder_uid in selection.folder_uids() {
                if is_same_or_descendant(&items, destination, folder_uid) {
                    return Err(AppError::conflict(format!(
                        "Cannot move folder '{folder_uid}' into itself or one of its subfolders"
                    )));
                }
            }
        }

        let mut moved = 0u64;
        for item in items.iter_mut() {
            if moving.contains(item.uid.as_str()) {
                item.parent_uid = destination_uid.map(str::to_string);
                item.parent_title = destination_title.clone();
                moved += 1;
            }
        }

        info!(moved, ?destination_uid, "Moved items");
        Ok(moved)
    }
}

fn require_item<'a>(items: &'a [DashboardViewItem], uid: &str) -> AppResult<&'a DashboardViewItem> {
    items
        .iter()
        .find(|item| item.uid == uid)
        .ok_or_else(|| AppError::not_found(format!("Item '{uid}' not found")))
}

fn require_folder<'a>(items: &'a [DashboardViewItem], uid: &str) -> AppResult<&'a DashboardViewItem> {
    let item = items
        .iter()
        .find(|item| item.uid == uid)
        .ok_or_else(|| AppError::not_found(format!("Folder '{uid}' not found")))?;

    if !item.is_folder() {
        return Err(AppError::validation(format!(
            "Item '{uid}' is a {}, not a folder",
            item.kind
        )));
    }
    Ok(item)
}

/// Whether `uid` is `ancestor_uid` or sits somewhere beneath it.
fn is_same_or_descendant(items: &[DashboardViewItem], uid: &str, ancestor_uid: &str) -> bool {
    let parents: HashMap<&str, Option<&str>> = items
        .iter()
        .map(|item| (item.uid.as_str(), item.parent_uid.as_deref()))
        .collect();

    let mut current = Some(uid);
    let mut steps = 0;
    while let Some(uid) = current {
        if uid == ancestor_uid {
            return true;
        }
        steps += 1;
        if steps > items.len() {
            return false;
        }
        current = parents.get(uid).copied().flatten();
    }
    false
}

fn validate_items(items: &[DashboardViewItem]) -> AppResult<()> {
    let mut by_uid: HashMap<&str, &DashboardViewItem> = HashMap::with_capacity(items.len());
    for item in items {
        if by_uid.insert(item.uid.as_str(), item).is_some() {
            return Err(AppError::conflict(format!("Duplicate item uid '{}'", item.uid)));
        }
    }

    for item in items {
        let Some(parent_uid) = item.parent_uid.as_deref() else {
            continue;
        };
        match by_uid.get(parent_uid) {
            None => {
                return Err(AppError::validation(format!(
                    "Item '{}' references missing parent '{parent_uid}'",
                    item.uid
                )));
            }
            Some(parent) if !parent.is_folder() => {
                return Err(AppError::validation(format!(
                    "Item '{}' has parent '{parent_uid}', which is a {}",
                    item.uid, parent.kind
                )));
            }
            Some(_) => {}
        }
    }

    for item in items {
        let mut current = item.parent_uid.as_deref();
        let mut steps = 0;
        while let Some(uid) = current {
            steps += 1;
            if uid == item.uid || steps > items.len() {
                return Err(AppError::validation(format!(
                    "Item '{}' is its own ancestor",
                    item.uid
                )));
            }
            current = by_uid.get(uid).and_then(|parent| parent.parent_uid.as_deref());
        }
    }

    Ok(())
}

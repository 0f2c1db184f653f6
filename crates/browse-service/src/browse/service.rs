//! Browse view orchestration: fetching, dispatching, and derived reads.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use browse_core::config::browse::BrowseConfig;
use browse_core::error::AppError;
use browse_core::result::AppResult;
use browse_entity::{
    ActionSelection, BrowseDashboardsState, DashboardViewItem, DashboardViewItemKind,
    DashboardsTreeItem, ItemRef, SelectionState,
};

use super::actions::BrowseAction;
use super::fetch::{FetchSequencer, FetchTicket};
use super::reducers::apply;
use super::selectors;
use crate::source::{BulkActionTarget, ItemSource};

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The children were stored.
    Applied {
        /// Number of children stored.
        count: usize,
    },
    /// A newer fetch for the same folder was issued first; the result
    /// was dropped.
    Stale,
}

/// Memoised flat tree for one (revision, folder) pair.
#[derive(Debug)]
struct FlatTreeMemo {
    revision: u64,
    folder_uid: Option<String>,
    rows: Arc<Vec<DashboardsTreeItem>>,
}

/// Everything guarded by the dispatch lock.
#[derive(Debug, Default)]
struct Inner {
    state: BrowseDashboardsState,
    /// Bumped by every action that can change the flat tree.
    tree_revision: u64,
    flat_tree_memo: Option<FlatTreeMemo>,
}

/// Owns the browse state for one view and applies actions to it one at a
/// time.
#[derive(Debug)]
pub struct BrowseService {
    /// Where children come from.
    source: Arc<dyn ItemSource>,
    /// Fetch and rendering settings.
    config: BrowseConfig,
    /// Per-folder fetch tickets.
    sequencer: FetchSequencer,
    /// State, revision, and memo.
    inner: Mutex<Inner>,
}

impl BrowseService {
    /// Creates a new browse service with empty state.
    pub fn new(source: Arc<dyn ItemSource>, config: BrowseConfig) -> Self {
        Self {
            source,
            config,
            sequencer: FetchSequencer::new(),
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply one action to the state.
    pub fn dispatch(&self, action: BrowseAction) {
        let mut inner = self.lock();
        Self::apply_locked(&mut inner, action);
    }

    fn apply_locked(inner: &mut Inner, action: BrowseAction) {
        debug!(action = action.name(), "Dispatching browse action");

        if action.touches_tree() {
            inner.tree_revision += 1;
        }
        apply(&mut inner.state, action);
    }

    /// Fetch the children of `folder_uid` (the root when None) and store
    /// them.
    ///
    /// Failures leave the state untouched. When stale-fetch discarding is
    /// enabled, a result superseded by a newer fetch for the same folder
    /// is dropped.
    pub async fn load_children(&self, folder_uid: Option<&str>) -> AppResult<FetchOutcome> {
        let ticket = self.sequencer.issue(folder_uid);
        debug!(?folder_uid, sequence = ticket.sequence, "Fetching children");

        let children = tokio::time::timeout(
            self.config.fetch_timeout(),
            self.source.fetch_children(folder_uid),
        )
        .await
        .map_err(|_| {
            AppError::external_service(format!(
                "Fetching children of {} timed out after {}s",
                folder_uid.unwrap_or("root"),
                self.config.fetch_timeout_seconds
            ))
        })??;

        Ok(self.apply_fetched(&ticket, children))
    }

    /// Store fetched children unless the ticket was superseded.
    ///
    /// The ticket check and the state change happen under the same lock
    /// as [`reset`](Self::reset), so a result cannot land after a newer
    /// fetch or a reset has been recorded.
    fn apply_fetched(&self, ticket: &FetchTicket, children: Vec<DashboardViewItem>) -> FetchOutcome {
        let folder_uid = ticket.folder_uid.as_deref();
        let mut inner = self.lock();

        if self.config.discard_stale_fetches && !self.sequencer.is_current(ticket) {
            warn!(
                ?folder_uid,
                sequence = ticket.sequence,
                "Discarding superseded fetch result"
            );
            return FetchOutcome::Stale;
        }

        let count = children.len();
        info!(?folder_uid, count, "Loaded children");

        Self::apply_locked(
            &mut inner,
            BrowseAction::FetchChildrenFulfilled {
                parent_uid: ticket.folder_uid.clone(),
                children,
            },
        );
        FetchOutcome::Applied { count }
    }

    /// Expand or collapse a folder. Expanding also fetches its children.
    pub async fn set_folder_open(&self, folder_uid: &str, is_open: bool) -> AppResult<()> {
        self.dispatch(BrowseAction::SetFolderOpenState {
            folder_uid: folder_uid.to_string(),
            is_open,
        });

        if is_open {
            self.load_children(Some(folder_uid)).await?;
        }
        Ok(())
    }

    /// Toggle an item's checkbox.
    pub fn set_item_selection(&self, item: ItemRef, is_selected: bool) {
        self.dispatch(BrowseAction::SetItemSelectionState { item, is_selected });
    }

    /// Look up a loaded item by uid.
    pub fn find_item(&self, uid: &str) -> Option<DashboardViewItem> {
        self.lock().state.find_item(uid).cloned()
    }

    /// Visible rows, starting at `folder_uid` (the root when None).
    ///
    /// The result is reused until an action changes the tree or a
    /// different folder is requested.
    pub fn flat_tree(&self, folder_uid: Option<&str>) -> Arc<Vec<DashboardsTreeItem>> {
        let mut inner = self.lock();
        let revision = inner.tree_revision;

        if let Some(memo) = &inner.flat_tree_memo {
            if memo.revision == revision && memo.folder_uid.as_deref() == folder_uid {
                return Arc::clone(&memo.rows);
            }
        }

        let rows = Arc::new(selectors::flat_tree(&inner.state, folder_uid));
        inner.flat_tree_memo = Some(FlatTreeMemo {
            revision,
            folder_uid: folder_uid.map(str::to_string),
            rows: Arc::clone(&rows),
        });
        rows
    }

    /// Checkbox state for one item.
    pub fn selection_state(&self, kind: DashboardViewItemKind, uid: &str) -> SelectionState {
        let inner = self.lock();
        selectors::selection_state(
            &inner.state.selected_items,
            &inner.state.children_by_parent_uid,
            kind,
            uid,
        )
    }

    /// Whether anything is selected.
    pub fn has_selection(&self) -> bool {
        selectors::has_selection(&self.lock().state.selected_items)
    }

    /// The selection reduced for bulk actions.
    pub fn selected_items_for_actions(&self) -> ActionSelection {
        let inner = self.lock();
        selectors::selected_items_for_actions(
            &inner.state.selected_items,
            &inner.state.children_by_parent_uid,
        )
    }

    /// A copy of the full state.
    pub fn snapshot(&self) -> BrowseDashboardsState {
        self.lock().state.clone()
    }

    /// Tear the view down: drop all state and make in-flight fetches stale.
    pub fn reset(&self) {
        let mut inner = self.lock();
        self.sequencer.invalidate_all();
        Self::apply_locked(&mut inner, BrowseAction::Reset);
    }

    /// Delete the selected items, then reload the root and the viewed
    /// folder.
    pub async fn delete_selected(
        &self,
        target: &dyn BulkActionTarget,
        viewed_folder_uid: Option<&str>,
    ) -> AppResult<u64> {
        let selection = self.require_action_selection()?;
        let removed = target.delete_items(&selection).await?;
        info!(removed, "Deleted selected items");

        self.reload(viewed_folder_uid).await?;
        Ok(removed)
    }

    /// Move the selected items into `destination_uid`, then reload the
    /// view.
    pub async fn move_selected(
        &self,
        target: &dyn BulkActionTarget,
        destination_uid: Option<&str>,
        viewed_folder_uid: Option<&str>,
    ) -> AppResult<u64> {
        let selection = self.require_action_selection()?;
        let moved = target.move_items(&selection, destination_uid).await?;
        info!(moved, ?destination_uid, "Moved selected items");

        self.reload(viewed_folder_uid).await?;
        Ok(moved)
    }

    fn require_action_selection(&self) -> AppResult<ActionSelection> {
        let selection = self.selected_items_for_actions();
        if selection.is_empty() {
            return Err(AppError::validation("No folders or dashboards are selected"));
        }
        Ok(selection)
    }

    async fn reload(&self, viewed_folder_uid: Option<&str>) -> AppResult<()> {
        self.reset();
        self.load_children(None).await?;
        if viewed_folder_uid.is_some() {
            self.load_children(viewed_folder_uid).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use browse_entity::DashboardViewItemKind::{Dashboard, Folder};

    fn fixture() -> Vec<DashboardViewItem> {
        vec![
            DashboardViewItem::folder("a", "Alpha"),
            DashboardViewItem::folder("b", "Beta").in_folder("a"),
            DashboardViewItem::dashboard("d1", "One").in_folder("a"),
            DashboardViewItem::dashboard("d2", "Two").in_folder("b"),
            DashboardViewItem::folder("e", "Empty"),
        ]
    }

    fn dashboard_in(uid: &str, folder_uid: &str) -> DashboardViewItem {
        DashboardViewItem::dashboard(uid, uid.to_uppercase()).in_folder(folder_uid)
    }

    fn make_service() -> (Arc<MemorySource>, BrowseService) {
        let source = Arc::new(MemorySource::new(fixture()).unwrap());
        let service = BrowseService::new(source.clone(), BrowseConfig::default());
        (source, service)
    }

    #[tokio::test]
    async fn test_load_root() {
        let (_, service) = make_service();
        let outcome = service.load_children(None).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Applied { count: 2 });

        let rows = service.flat_tree(None);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.level == 0));
    }

    #[tokio::test]
    async fn test_open_folder_fetches_and_expands() {
        let (source, service) = make_service();
        service.load_children(None).await.unwrap();
        service.set_folder_open("a", true).await.unwrap();

        assert_eq!(source.fetch_count(), 2);
        let uids: Vec<_> = service
            .flat_tree(None)
            .iter()
            .map(|row| row.item.uid().to_string())
            .collect();
        assert_eq!(uids, vec!["a", "b", "d1", "e"]);

        service.set_folder_open("a", false).await.unwrap();
        assert_eq!(source.fetch_count(), 2);
        assert_eq!(service.flat_tree(None).len(), 2);
    }

    #[tokio::test]
    async fn test_open_empty_folder_shows_placeholder() {
        let (_, service) = make_service();
        service.load_children(None).await.unwrap();
        service.set_folder_open("e", true).await.unwrap();

        let rows = service.flat_tree(None);
        assert_eq!(rows.last().map(|row| row.item.uid()), Some("e-empty-folder"));
    }

    #[tokio::test]
    async fn test_flat_tree_is_memoised_until_tree_changes() {
        let (_, service) = make_service();
        service.load_children(None).await.unwrap();

        let first = service.flat_tree(None);
        let second = service.flat_tree(None);
        assert!(Arc::ptr_eq(&first, &second));

        service.set_item_selection(ItemRef::new(Folder, "e", None), true);
        assert!(Arc::ptr_eq(&first, &service.flat_tree(None)));

        service.set_folder_open("a", true).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &service.flat_tree(None)));
    }

    #[tokio::test]
    async fn test_selection_through_service() {
        let (_, service) = make_service();
        service.load_children(None).await.unwrap();
        service.set_folder_open("a", true).await.unwrap();

        service.set_item_selection(ItemRef::new(Dashboard, "d1", Some("a".into())), true);
        assert!(service.has_selection());
        assert_eq!(service.selection_state(Folder, "a"), SelectionState::Mixed);
        assert_eq!(service.selection_state(Dashboard, "d1"), SelectionState::Selected);
        assert_eq!(service.selection_state(Folder, "b"), SelectionState::Unselected);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_state_untouched() {
        let (_, service) = make_service();
        service.load_children(None).await.unwrap();

        let err = service.load_children(Some("missing")).await.unwrap_err();
        assert_eq!(err.kind, browse_core::error::ErrorKind::NotFound);
        assert!(service.snapshot().children_of("missing").is_none());
    }

    #[tokio::test]
    async fn test_bulk_action_requires_selection() {
        let (source, service) = make_service();
        service.load_children(None).await.unwrap();

        let err = service
            .delete_selected(source.as_ref(), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, browse_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_result_checked_after_reset_is_stale() {
        let (_, service) = make_service();
        let ticket = service.sequencer.issue(Some("a"));

        service.reset();
        let outcome = service.apply_fetched(&ticket, vec![dashboard_in("d1", "a")]);

        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(service.snapshot().children_of("a").is_none());
    }

    #[test]
    fn test_superseded_result_never_overwrites_newer() {
        let (_, service) = make_service();
        let older = service.sequencer.issue(Some("a"));
        let newer = service.sequencer.issue(Some("a"));

        let applied = service.apply_fetched(&newer, vec![dashboard_in("new", "a")]);
        let dropped = service.apply_fetched(&older, vec![dashboard_in("old", "a")]);

        assert_eq!(applied, FetchOutcome::Applied { count: 1 });
        assert_eq!(dropped, FetchOutcome::Stale);
        assert_eq!(service.snapshot().children_of("a").unwrap()[0].uid, "new");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reset_never_leaves_stale_children() {
        for _ in 0..200 {
            let (_, service) = make_service();
            let service = Arc::new(service);
            let ticket = service.sequencer.issue(Some("a"));

            let applier = {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.apply_fetched(&ticket, vec![dashboard_in("d1", "a")]) })
            };
            let resetter = {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.reset() })
            };

            let outcome = applier.await.unwrap();
            resetter.await.unwrap();

            // Either the result landed before the reset wiped it, or it was
            // rejected; it is never present after both finish.
            assert!(matches!(outcome, FetchOutcome::Applied { .. } | FetchOutcome::Stale));
            assert!(service.snapshot().children_of("a").is_none());
        }
    }

    #[tokio::test]
    async fn test_reset_clears_state() {
        let (_, service) = make_service();
        service.load_children(None).await.unwrap();
        service.set_item_selection(ItemRef::new(Folder, "a", None), true);

        service.reset();

        assert_eq!(service.snapshot(), BrowseDashboardsState::default());
        assert!(service.flat_tree(None).is_empty());
    }
}

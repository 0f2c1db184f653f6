//! State transitions for the browse tree.
//!
//! Every function here mutates a [`BrowseDashboardsState`] synchronously
//! and completely; callers never observe a half-propagated selection.

use std::collections::BTreeMap;

use tracing::debug;

use browse_entity::{
    BrowseDashboardsState, DashboardTreeSelection, DashboardViewItem, DashboardViewItemKind,
    ItemRef,
};

use super::actions::BrowseAction;

/// Apply an action and return the resulting state.
pub fn reduce(mut state: BrowseDashboardsState, action: BrowseAction) -> BrowseDashboardsState {
    apply(&mut state, action);
    state
}

/// Apply an action in place.
pub fn apply(state: &mut BrowseDashboardsState, action: BrowseAction) {
    match action {
        BrowseAction::FetchChildrenFulfilled {
            parent_uid,
            children,
        } => fetch_children_fulfilled(state, parent_uid, children),
        BrowseAction::SetFolderOpenState {
            folder_uid,
            is_open,
        } => set_folder_open_state(state, folder_uid, is_open),
        BrowseAction::SetItemSelectionState { item, is_selected } => {
            set_item_selection_state(state, &item, is_selected)
        }
        BrowseAction::Reset => *state = BrowseDashboardsState::default(),
    }
}

/// Store freshly loaded children.
///
/// Children of a folder that is already selected are selected too, so a
/// "select folder" issued before its contents were known still covers
/// them.
pub fn fetch_children_fulfilled(
    state: &mut BrowseDashboardsState,
    parent_uid: Option<String>,
    children: Vec<DashboardViewItem>,
) {
    let Some(parent_uid) = parent_uid else {
        state.root_items = children;
        return;
    };

    if state
        .selected_items
        .is_selected(DashboardViewItemKind::Folder, &parent_uid)
    {
        for child in &children {
            state.selected_items.set(child.kind, &child.uid, true);
        }
    }

    state.children_by_parent_uid.insert(parent_uid, children);
}

/// Expand or collapse a folder.
pub fn set_folder_open_state(state: &mut BrowseDashboardsState, folder_uid: String, is_open: bool) {
    state.open_folders.insert(folder_uid, is_open);
}

/// Toggle an item and reconcile its descendants and ancestors.
///
/// The item and every loaded descendant take `is_selected`. Each ancestor
/// is then re-derived bottom-up: when selecting, an ancestor becomes
/// selected only if all of its loaded children now are; when
/// deselecting, every ancestor is cleared so it reads as mixed.
pub fn set_item_selection_state(
    state: &mut BrowseDashboardsState,
    item: &ItemRef,
    is_selected: bool,
) {
    mark_subtree(
        &mut state.selected_items,
        &state.children_by_parent_uid,
        item.kind,
        &item.uid,
        is_selected,
    );

    let mut next_parent_uid = item.parent_uid.clone();

    while let Some(parent_uid) = next_parent_uid {
        let Some(parent) = state.find_item(&parent_uid) else {
            debug!(%parent_uid, "Ancestor not loaded, stopping selection reconciliation");
            break;
        };
        let parent_kind = parent.kind;
        let grandparent_uid = parent.parent_uid.clone();

        let parent_selected = is_selected
            && state.children_of(&parent_uid).is_some_and(|children| {
                children
                    .iter()
                    .all(|child| state.selected_items.is_selected(child.kind, &child.uid))
            });
        state
            .selected_items
            .set(parent_kind, &parent_uid, parent_selected);

        next_parent_uid = grandparent_uid;
    }
}

fn mark_subtree(
    selected: &mut DashboardTreeSelection,
    children_by_parent_uid: &BTreeMap<String, Vec<DashboardViewItem>>,
    kind: DashboardViewItemKind,
    uid: &str,
    is_selected: bool,
) {
    selected.set(kind, uid, is_selected);

    if !kind.is_folder() {
        return;
    }

    for child in children_by_parent_uid.get(uid).into_iter().flatten() {
        mark_subtree(
            selected,
            children_by_parent_uid,
            child.kind,
            &child.uid,
            is_selected,
        );
    }
}

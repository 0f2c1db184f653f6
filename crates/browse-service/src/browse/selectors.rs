//! Derived views over the browse state.

use std::collections::{BTreeMap, HashMap};

use browse_entity::{
    ActionSelection, BrowseDashboardsState, DashboardTreeSelection, DashboardViewItem,
    DashboardViewItemKind, DashboardsTreeItem, SelectionState, TreeRowItem,
};

/// Flatten the tree into the rows currently visible, depth-first.
///
/// With `folder_uid` set the view starts inside that folder and its
/// children sit at level 0; otherwise the root items do. An open folder
/// whose children loaded as an empty list gets one `ui-empty-folder`
/// placeholder row; an open folder that has not loaded yet shows nothing
/// beneath it.
pub fn create_flat_tree(
    folder_uid: Option<&str>,
    root_items: &[DashboardViewItem],
    children_by_parent_uid: &BTreeMap<String, Vec<DashboardViewItem>>,
    open_folders: &HashMap<String, bool>,
) -> Vec<DashboardsTreeItem> {
    let mut rows = Vec::new();
    flatten_level(
        &mut rows,
        folder_uid,
        root_items,
        children_by_parent_uid,
        open_folders,
        0,
    );
    rows
}

/// [`create_flat_tree`] over a whole state.
pub fn flat_tree(state: &BrowseDashboardsState, folder_uid: Option<&str>) -> Vec<DashboardsTreeItem> {
    create_flat_tree(
        folder_uid,
        &state.root_items,
        &state.children_by_parent_uid,
        &state.open_folders,
    )
}

fn flatten_level(
    rows: &mut Vec<DashboardsTreeItem>,
    folder_uid: Option<&str>,
    root_items: &[DashboardViewItem],
    children_by_parent_uid: &BTreeMap<String, Vec<DashboardViewItem>>,
    open_folders: &HashMap<String, bool>,
    level: usize,
) {
    let is_open = level == 0 || folder_uid.is_some_and(|uid| is_open_in(open_folders, uid));

    let items: &[DashboardViewItem] = match folder_uid {
        Some(uid) if is_open => children_by_parent_uid
            .get(uid)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        Some(_) => &[],
        None => root_items,
    };

    for item in items {
        let item_open = is_open_in(open_folders, &item.uid);

        rows.push(DashboardsTreeItem {
            item: TreeRowItem::Item(item.clone()),
            parent_uid: folder_uid.map(str::to_string),
            level,
            is_open: item_open,
        });

        flatten_level(
            rows,
            Some(&item.uid),
            root_items,
            children_by_parent_uid,
            open_folders,
            level + 1,
        );

        let loaded_empty = children_by_parent_uid
            .get(&item.uid)
            .is_some_and(Vec::is_empty);
        if item_open && loaded_empty {
            rows.push(DashboardsTreeItem {
                item: TreeRowItem::empty_folder(&item.uid),
                parent_uid: Some(item.uid.clone()),
                level: level + 1,
                is_open: false,
            });
        }
    }
}

fn is_open_in(open_folders: &HashMap<String, bool>, uid: &str) -> bool {
    open_folders.get(uid).copied().unwrap_or(false)
}

/// Whether anything of any kind is selected.
pub fn has_selection(selection: &DashboardTreeSelection) -> bool {
    selection.has_any()
}

/// Checkbox state for one item.
///
/// Mixed only looks at direct children's own flags. An item whose only
/// selected descendants are grandchildren or deeper reads as unselected.
pub fn selection_state(
    selection: &DashboardTreeSelection,
    children_by_parent_uid: &BTreeMap<String, Vec<DashboardViewItem>>,
    kind: DashboardViewItemKind,
    uid: &str,
) -> SelectionState {
    if selection.is_selected(kind, uid) {
        return SelectionState::Selected;
    }

    // A fully selected folder already returned above, so any selected
    // child here means a partial selection.
    let is_mixed = children_by_parent_uid
        .get(uid)
        .into_iter()
        .flatten()
        .any(|child| selection.is_selected(child.kind, &child.uid));
    if is_mixed {
        return SelectionState::Mixed;
    }

    SelectionState::Unselected
}

/// Reduce a selection for bulk move/delete requests.
///
/// Folder operations cascade on the backend, so the direct children of
/// every selected folder are cleared in the output. Each selected folder
/// clears its own children, which covers nested selected folders at any
/// depth. Panels are dropped.
pub fn selected_items_for_actions(
    selection: &DashboardTreeSelection,
    children_by_parent_uid: &BTreeMap<String, Vec<DashboardViewItem>>,
) -> ActionSelection {
    let mut result = ActionSelection {
        folder: selection.folder.clone(),
        dashboard: selection.dashboard.clone(),
    };

    let selected_folders = selection
        .folder
        .iter()
        .filter(|(_, selected)| **selected)
        .map(|(uid, _)| uid);

    for folder_uid in selected_folders {
        for child in children_by_parent_uid.get(folder_uid).into_iter().flatten() {
            match child.kind {
                DashboardViewItemKind::Dashboard => {
                    result.dashboard.insert(child.uid.clone(), false);
                }
                DashboardViewItemKind::Folder => {
                    result.folder.insert(child.uid.clone(), false);
                }
                DashboardViewItemKind::Panel => {}
            }
        }
    }

    result
}

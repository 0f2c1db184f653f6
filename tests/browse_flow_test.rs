//! Integration tests for tree flattening and selection reconciliation.

mod helpers;

use browse_entity::DashboardViewItemKind::{Dashboard, Folder};
use browse_entity::SelectionState;

use helpers::{TestBrowser, rows_summary};

fn owned(rows: &[(&str, usize)]) -> Vec<(String, usize)> {
    rows.iter().map(|(uid, level)| (uid.to_string(), *level)).collect()
}

#[tokio::test]
async fn test_closed_tree_lists_only_roots() {
    let browser = TestBrowser::new().await;

    let rows = browser.service.flat_tree(None);

    assert_eq!(
        rows_summary(&rows),
        owned(&[("infra", 0), ("apps", 0), ("archive", 0), ("home", 0)])
    );
}

#[tokio::test]
async fn test_nested_expansion_order() {
    let browser = TestBrowser::new().await;
    browser.open(&["infra", "k8s", "apps"]).await;

    let rows = browser.service.flat_tree(None);

    assert_eq!(
        rows_summary(&rows),
        owned(&[
            ("infra", 0),
            ("k8s", 1),
            ("k8s-nodes", 2),
            ("k8s-pods", 2),
            ("net", 1),
            ("apps", 0),
            ("checkout", 1),
            ("archive", 0),
            ("home", 0),
        ])
    );
}

#[tokio::test]
async fn test_open_empty_folder_gets_one_placeholder() {
    let browser = TestBrowser::new().await;
    browser.open(&["archive"]).await;

    let rows = browser.service.flat_tree(None);
    let placeholders: Vec<_> = rows.iter().filter(|row| row.item.is_empty_folder()).collect();

    assert_eq!(placeholders.len(), 1);
    assert_eq!(placeholders[0].item.uid(), "archive-empty-folder");
    assert_eq!(placeholders[0].level, 1);
}

#[tokio::test]
async fn test_collapsing_keeps_loaded_children() {
    let browser = TestBrowser::new().await;
    browser.open(&["infra"]).await;
    browser.service.set_folder_open("infra", false).await.unwrap();

    assert_eq!(browser.service.flat_tree(None).len(), 4);
    assert!(browser.service.snapshot().children_of("infra").is_some());
}

#[tokio::test]
async fn test_viewing_a_folder() {
    let browser = TestBrowser::new().await;
    browser.service.load_children(Some("infra")).await.unwrap();

    let rows = browser.service.flat_tree(Some("infra"));

    assert_eq!(rows_summary(&rows), owned(&[("k8s", 0), ("net", 0)]));
    assert!(rows.iter().all(|row| row.parent_uid.as_deref() == Some("infra")));
}

#[tokio::test]
async fn test_selecting_folder_selects_descendants_idempotently() {
    let browser = TestBrowser::new().await;
    browser.open(&["infra", "k8s"]).await;

    browser.toggle("infra", true);
    let first = browser.service.snapshot().selected_items;
    browser.toggle("infra", true);
    let second = browser.service.snapshot().selected_items;

    assert_eq!(first, second);
    for (kind, uid) in [
        (Folder, "infra"),
        (Folder, "k8s"),
        (Dashboard, "k8s-nodes"),
        (Dashboard, "k8s-pods"),
        (Dashboard, "net"),
    ] {
        assert_eq!(
            browser.service.selection_state(kind, uid),
            SelectionState::Selected,
            "{uid} should be selected"
        );
    }
    assert_eq!(
        browser.service.selection_state(Folder, "apps"),
        SelectionState::Unselected
    );
}

#[tokio::test]
async fn test_deselecting_leaf_clears_selected_ancestors() {
    let browser = TestBrowser::new().await;
    browser.open(&["infra", "k8s"]).await;
    browser.toggle("infra", true);

    browser.toggle("k8s-pods", false);

    let selected = browser.service.snapshot().selected_items;
    assert!(!selected.is_selected(Folder, "k8s"));
    assert!(!selected.is_selected(Folder, "infra"));
    assert!(selected.is_selected(Dashboard, "k8s-nodes"));
    assert!(selected.is_selected(Dashboard, "net"));

    assert_eq!(
        browser.service.selection_state(Folder, "k8s"),
        SelectionState::Mixed
    );
    assert_eq!(
        browser.service.selection_state(Folder, "infra"),
        SelectionState::Mixed
    );
}

#[tokio::test]
async fn test_selecting_last_child_completes_parent_chain() {
    let browser = TestBrowser::new().await;
    browser.open(&["infra", "k8s"]).await;

    browser.toggle("net", true);
    browser.toggle("k8s-nodes", true);
    assert_eq!(
        browser.service.selection_state(Folder, "k8s"),
        SelectionState::Mixed
    );

    browser.toggle("k8s-pods", true);

    assert_eq!(
        browser.service.selection_state(Folder, "k8s"),
        SelectionState::Selected
    );
    assert_eq!(
        browser.service.selection_state(Folder, "infra"),
        SelectionState::Selected
    );
}

#[tokio::test]
async fn test_deep_selection_reads_unselected_at_grandparent() {
    let browser = TestBrowser::new().await;
    browser.open(&["infra", "k8s"]).await;

    browser.toggle("k8s-nodes", true);

    assert_eq!(
        browser.service.selection_state(Folder, "k8s"),
        SelectionState::Mixed
    );
    // direct children of infra are k8s and net, neither flagged
    assert_eq!(
        browser.service.selection_state(Folder, "infra"),
        SelectionState::Unselected
    );
}

#[tokio::test]
async fn test_action_selection_collapses_selected_folder() {
    let browser = TestBrowser::new().await;
    browser.open(&["infra", "k8s"]).await;
    browser.toggle("k8s", true);

    let action = browser.service.selected_items_for_actions();

    assert_eq!(action.folder_uids().collect::<Vec<_>>(), vec!["k8s"]);
    assert_eq!(action.dashboard_uids().count(), 0);
    assert_eq!(action.dashboard.get("k8s-nodes"), Some(&false));
    assert_eq!(action.dashboard.get("k8s-pods"), Some(&false));
}

#[tokio::test]
async fn test_children_loaded_into_selected_folder_are_selected() {
    let browser = TestBrowser::new().await;
    browser.toggle("apps", true);
    assert!(browser.service.snapshot().children_of("apps").is_none());

    browser.open(&["apps"]).await;

    assert_eq!(
        browser.service.selection_state(Dashboard, "checkout"),
        SelectionState::Selected
    );
}

#[tokio::test]
async fn test_has_selection_tracks_flags() {
    let browser = TestBrowser::new().await;
    assert!(!browser.service.has_selection());

    browser.toggle("home", true);
    assert!(browser.service.has_selection());

    browser.toggle("home", false);
    assert!(!browser.service.has_selection());
}

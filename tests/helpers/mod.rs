//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use browse_core::config::browse::BrowseConfig;
use browse_core::result::AppResult;
use browse_entity::{DashboardViewItem, DashboardsTreeItem};
use browse_service::{BrowseService, ItemSource, MemorySource};

/// infra/
///   k8s/
///     k8s-nodes
///     k8s-pods
///   net
/// apps/
///   checkout
/// archive/      (empty)
/// home
pub fn sample_items() -> Vec<DashboardViewItem> {
    vec![
        DashboardViewItem::folder("infra", "Infrastructure"),
        DashboardViewItem::folder("k8s", "Kubernetes").in_folder("infra"),
        DashboardViewItem::dashboard("k8s-nodes", "Nodes").in_folder("k8s"),
        DashboardViewItem::dashboard("k8s-pods", "Pods").in_folder("k8s"),
        DashboardViewItem::dashboard("net", "Network").in_folder("infra"),
        DashboardViewItem::folder("apps", "Applications"),
        DashboardViewItem::dashboard("checkout", "Checkout latency").in_folder("apps"),
        DashboardViewItem::folder("archive", "Archive"),
        DashboardViewItem::dashboard("home", "Home"),
    ]
}

/// A browse service over the sample tree
pub struct TestBrowser {
    /// Source behind the service
    pub source: Arc<MemorySource>,
    /// Service under test
    pub service: BrowseService,
}

impl TestBrowser {
    /// Create a browser with the root already loaded
    pub async fn new() -> Self {
        let source = Arc::new(MemorySource::new(sample_items()).expect("valid sample items"));
        let service = BrowseService::new(source.clone(), BrowseConfig::default());
        service
            .load_children(None)
            .await
            .expect("root loads");
        Self { source, service }
    }

    /// Expand folders in order
    pub async fn open(&self, folder_uids: &[&str]) {
        for uid in folder_uids {
            self.service
                .set_folder_open(uid, true)
                .await
                .expect("folder opens");
        }
    }

    /// Toggle a loaded item by uid
    pub fn toggle(&self, uid: &str, is_selected: bool) {
        let item = self
            .service
            .find_item(uid)
            .unwrap_or_else(|| panic!("item '{uid}' is loaded"));
        self.service.set_item_selection(item.to_ref(), is_selected);
    }
}

/// `(uid, level)` pairs for a row list
pub fn rows_summary(rows: &[DashboardsTreeItem]) -> Vec<(String, usize)> {
    rows.iter()
        .map(|row| (row.item.uid().to_string(), row.level))
        .collect()
}

/// One scripted response
#[derive(Debug, Clone)]
pub struct Scripted {
    /// How long the fetch takes
    pub delay: Duration,
    /// What it returns
    pub children: Vec<DashboardViewItem>,
}

/// A source that answers each call with the next scripted response
#[derive(Debug, Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Scripted>>,
}

impl ScriptedSource {
    /// Create a source from responses in call order
    pub fn new(responses: Vec<Scripted>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl ItemSource for ScriptedSource {
    async fn fetch_children(&self, _parent_uid: Option<&str>) -> AppResult<Vec<DashboardViewItem>> {
        let next = self
            .responses
            .lock()
            .expect("script lock")
            .pop_front();

        match next {
            Some(scripted) => {
                tokio::time::sleep(scripted.delay).await;
                Ok(scripted.children)
            }
            None => Ok(Vec::new()),
        }
    }
}

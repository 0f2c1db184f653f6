//! Shared setup: load a fixture, open folders, and apply selections.

use std::str::FromStr;
use std::sync::Arc;

use clap::Args;
use tracing::debug;

use browse_core::config::AppConfig;
use browse_core::error::AppError;
use browse_entity::DashboardViewItemKind;
use browse_service::{BrowseService, MemorySource};

/// Arguments describing a browse view
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// JSON file holding a flat array of items
    #[arg(long)]
    pub fixture: String,

    /// Folder to view (omit for the root)
    #[arg(long)]
    pub folder: Option<String>,

    /// Folders to expand, in order
    #[arg(long = "open")]
    pub open: Vec<String>,

    /// Items to select, as `kind:uid`
    #[arg(long = "select")]
    pub select: Vec<ItemArg>,

    /// Items to deselect after selecting, as `kind:uid`
    #[arg(long = "deselect")]
    pub deselect: Vec<ItemArg>,
}

/// An item named on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg {
    /// Item kind
    pub kind: DashboardViewItemKind,
    /// Item uid
    pub uid: String,
}

impl FromStr for ItemArg {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, uid) = s.split_once(':').ok_or_else(|| {
            AppError::validation(format!("Expected `kind:uid`, got '{s}'"))
        })?;
        if uid.is_empty() {
            return Err(AppError::validation(format!("Missing uid in '{s}'")));
        }

        Ok(Self {
            kind: kind.parse()?,
            uid: uid.to_string(),
        })
    }
}

/// A loaded view and the source behind it
pub struct View {
    /// In-memory source loaded from the fixture
    pub source: Arc<MemorySource>,
    /// Browse service holding the view state
    pub service: BrowseService,
}

/// Load the fixture and replay the requested interactions
pub async fn build_view(args: &ViewArgs, config: &AppConfig) -> Result<View, AppError> {
    let source = Arc::new(MemorySource::from_json_file(&args.fixture).await?);
    let service = BrowseService::new(source.clone(), config.browse.clone());

    service.load_children(args.folder.as_deref()).await?;

    for folder_uid in &args.open {
        service.set_folder_open(folder_uid, true).await?;
    }

    for arg in &args.select {
        toggle(&service, arg, true)?;
    }
    for arg in &args.deselect {
        toggle(&service, arg, false)?;
    }

    Ok(View { source, service })
}

fn toggle(service: &BrowseService, arg: &ItemArg, is_selected: bool) -> Result<(), AppError> {
    let item = service.find_item(&arg.uid).ok_or_else(|| {
        AppError::not_found(format!(
            "Item '{}' is not loaded; open its folder first",
            arg.uid
        ))
    })?;

    if item.kind != arg.kind {
        return Err(AppError::validation(format!(
            "Item '{}' is a {}, not a {}",
            arg.uid, item.kind, arg.kind
        )));
    }

    debug!(uid = %arg.uid, is_selected, "Applying selection");
    service.set_item_selection(item.to_ref(), is_selected);
    Ok(())
}

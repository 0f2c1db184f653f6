//! Flat tree listing.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use browse_core::config::AppConfig;
use browse_core::error::AppError;
use browse_entity::{DashboardsTreeItem, SelectionState, TreeRowItem};
use browse_service::BrowseService;

use super::view::{self, ViewArgs};

/// Tree display row
#[derive(Debug, Serialize, Tabled)]
struct TreeRow {
    /// Checkbox
    #[tabled(rename = "sel")]
    checkbox: String,
    /// Indented title
    name: String,
    /// Item kind
    kind: String,
    /// Item uid
    uid: String,
    /// Depth
    level: usize,
}

/// Execute the tree command
pub async fn execute(
    args: &ViewArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let display = tree_rows(args, config).await?;
    output::print_list(&display, format);
    Ok(())
}

async fn tree_rows(args: &ViewArgs, config: &AppConfig) -> Result<Vec<TreeRow>, AppError> {
    let view = view::build_view(args, config).await?;
    let rows = view.service.flat_tree(args.folder.as_deref());

    Ok(rows
        .iter()
        .map(|row| to_display_row(&view.service, row, config.browse.indent_width))
        .collect())
}

fn to_display_row(service: &BrowseService, row: &DashboardsTreeItem, indent_width: usize) -> TreeRow {
    let indent = " ".repeat(row.level * indent_width);

    let (checkbox, title) = match &row.item {
        TreeRowItem::Item(item) => {
            let state = service.selection_state(item.kind, &item.uid);
            let marker = if item.is_folder() {
                if row.is_open { "▾ " } else { "▸ " }
            } else {
                "  "
            };
            (checkbox_for(state), format!("{marker}{}", item.title))
        }
        TreeRowItem::Ui(_) => (String::new(), "(empty folder)".to_string()),
    };

    TreeRow {
        checkbox,
        name: format!("{indent}{title}"),
        kind: row.item.kind_label().to_string(),
        uid: row.item.uid().to_string(),
        level: row.level,
    }
}

fn checkbox_for(state: SelectionState) -> String {
    match state {
        SelectionState::Selected => "[x]",
        SelectionState::Mixed => "[-]",
        SelectionState::Unselected => "[ ]",
    }
    .to_string()
}

//! Action selection listing.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use browse_core::config::AppConfig;
use browse_core::error::AppError;
use browse_entity::ActionSelection;

use super::view::{self, ViewArgs};

/// Selected item row
#[derive(Debug, Serialize, Tabled)]
struct SelectionRow {
    /// Item kind
    kind: &'static str,
    /// Item uid
    uid: String,
}

/// Execute the selection command
pub async fn execute(
    args: &ViewArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let view = view::build_view(args, config).await?;
    let selection = view.service.selected_items_for_actions();

    match format {
        OutputFormat::Json => output::print_json(&selection),
        OutputFormat::Table => output::print_list(&selection_rows(&selection), format),
    }
    Ok(())
}

fn selection_rows(selection: &ActionSelection) -> Vec<SelectionRow> {
    selection
        .folder_uids()
        .map(|uid| SelectionRow {
            kind: "folder",
            uid: uid.to_string(),
        })
        .chain(selection.dashboard_uids().map(|uid| SelectionRow {
            kind: "dashboard",
            uid: uid.to_string(),
        }))
        .collect()
}

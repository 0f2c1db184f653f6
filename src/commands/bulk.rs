//! Bulk delete and move against a fixture.

use clap::{Args, Subcommand};
use tracing::info;

use crate::output;
use browse_core::config::AppConfig;
use browse_core::error::AppError;

use super::view::{self, ViewArgs};

/// Arguments for bulk commands
#[derive(Debug, Args)]
pub struct BulkArgs {
    /// Write the resulting items back to the fixture file
    #[arg(long, global = true)]
    pub save: bool,

    /// Bulk subcommand
    #[command(subcommand)]
    pub command: BulkCommand,
}

/// Bulk subcommands
#[derive(Debug, Subcommand)]
pub enum BulkCommand {
    /// Delete the selected folders (with their contents) and dashboards
    Delete(ViewArgs),
    /// Move the selected folders and dashboards
    Move {
        /// Destination folder uid (omit for the root)
        #[arg(long)]
        to: Option<String>,

        /// View to build the selection from
        #[command(flatten)]
        view: ViewArgs,
    },
}

/// Execute bulk commands
pub async fn execute(args: &BulkArgs, config: &AppConfig) -> Result<(), AppError> {
    let (view_args, view) = match &args.command {
        BulkCommand::Delete(view_args) => {
            let view = view::build_view(view_args, config).await?;
            let removed = view
                .service
                .delete_selected(view.source.as_ref(), view_args.folder.as_deref())
                .await?;
            output::print_success(&format!("Deleted {removed} item(s)"));
            (view_args, view)
        }
        BulkCommand::Move { to, view: view_args } => {
            let view = view::build_view(view_args, config).await?;
            let moved = view
                .service
                .move_selected(
                    view.source.as_ref(),
                    to.as_deref(),
                    view_args.folder.as_deref(),
                )
                .await?;
            let destination = to.as_deref().unwrap_or("the root");
            output::print_success(&format!("Moved {moved} item(s) to {destination}"));
            (view_args, view)
        }
    };

    if args.save {
        let items = view.source.items().await;
        let json = serde_json::to_string_pretty(&items)?;
        tokio::fs::write(&view_args.fixture, json).await?;
        info!(path = %view_args.fixture, count = items.len(), "Saved fixture");
        output::print_success(&format!("Saved {}", view_args.fixture));
    }

    Ok(())
}

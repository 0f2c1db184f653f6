//! CLI command definitions and dispatch.

pub mod bulk;
pub mod config;
pub mod selection;
pub mod tree;
pub mod view;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use browse_core::config::AppConfig;
use browse_core::error::AppError;

/// Browse a dashboard/folder tree, select items, and run bulk actions
#[derive(Debug, Parser)]
#[command(name = "dashboard-browse", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the visible rows of the tree with their checkbox state
    Tree(view::ViewArgs),
    /// Print the selection that a bulk action would receive
    Selection(view::ViewArgs),
    /// Delete or move the selected items
    Bulk(bulk::BulkArgs),
    /// Print the effective configuration
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Tree(args) => tree::execute(args, config, self.format).await,
            Commands::Selection(args) => selection::execute(args, config, self.format).await,
            Commands::Bulk(args) => bulk::execute(args, config).await,
            Commands::Config => config::execute(config, self.format),
        }
    }
}

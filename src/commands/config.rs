//! Configuration inspection.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use browse_core::config::AppConfig;
use browse_core::error::AppError;

/// One configuration setting
#[derive(Debug, Serialize, Tabled)]
struct ConfigRow {
    /// Dotted key, e.g. `browse.indent_width`
    key: &'static str,
    /// Effective value
    value: String,
}

/// Print the configuration after file and environment overlays.
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => output::print_json(config),
        OutputFormat::Table => output::print_list(&config_rows(config), format),
    }
    Ok(())
}

fn config_rows(config: &AppConfig) -> Vec<ConfigRow> {
    let browse = &config.browse;
    let logging = &config.logging;

    vec![
        ConfigRow {
            key: "browse.fetch_timeout_seconds",
            value: browse.fetch_timeout_seconds.to_string(),
        },
        ConfigRow {
            key: "browse.discard_stale_fetches",
            value: browse.discard_stale_fetches.to_string(),
        },
        ConfigRow {
            key: "browse.indent_width",
            value: browse.indent_width.to_string(),
        },
        ConfigRow {
            key: "logging.level",
            value: logging.level.clone(),
        },
        ConfigRow {
            key: "logging.format",
            value: logging.format.clone(),
        },
    ]
}

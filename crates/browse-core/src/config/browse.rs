//! Browse tree behaviour configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for child fetching and flat-tree rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Upper bound on a single child fetch, in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,
    /// Drop fetch results that were superseded by a newer request for
    /// the same folder.
    #[serde(default = "default_true")]
    pub discard_stale_fetches: bool,
    /// Spaces per tree level when rendering rows as text.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

impl BrowseConfig {
    /// Fetch timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_seconds: default_fetch_timeout(),
            discard_stale_fetches: true,
            indent_width: default_indent_width(),
        }
    }
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_indent_width() -> usize {
    2
}

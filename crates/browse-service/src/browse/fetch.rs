//! Per-folder fetch sequencing.
//!
//! Two fetches for the same folder may resolve out of order. Each request
//! takes a ticket; a response is applied only if its ticket is still the
//! newest one issued for that folder.

use dashmap::DashMap;
use tracing::debug;

/// Identifies one issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// The folder being fetched (None for the root listing).
    pub folder_uid: Option<String>,
    /// Position of this request among requests for the same folder.
    pub sequence: u64,
}

/// Issues and validates fetch tickets.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    /// Latest issued sequence per folder. The root is keyed by `None`.
    latest: DashMap<Option<String>, u64>,
}

impl FetchSequencer {
    /// Create an empty sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new fetch of `folder_uid`, superseding any
    /// outstanding ticket for the same folder.
    pub fn issue(&self, folder_uid: Option<&str>) -> FetchTicket {
        let key = folder_uid.map(str::to_string);
        let mut entry = self.latest.entry(key.clone()).or_insert(0);
        *entry += 1;

        FetchTicket {
            folder_uid: key,
            sequence: *entry,
        }
    }

    /// Whether no newer ticket has been issued for the ticket's folder.
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.latest
            .get(&ticket.folder_uid)
            .is_some_and(|latest| *latest == ticket.sequence)
    }

    /// Make every outstanding ticket stale.
    pub fn invalidate_all(&self) {
        let mut count = 0usize;
        for mut entry in self.latest.iter_mut() {
            *entry.value_mut() += 1;
            count += 1;
        }
        debug!(count, "Invalidated outstanding fetch tickets");
    }
}

//! # browse-service
//!
//! Logic layer for the dashboard browser. The reducers and selectors in
//! [`browse`] are plain functions over an explicitly owned
//! [`BrowseDashboardsState`](browse_entity::BrowseDashboardsState);
//! [`BrowseService`] wires them to an [`ItemSource`] and serializes every
//! mutation behind a single lock.
//!
//! Services follow constructor injection: dependencies are provided at
//! construction time via `Arc` references.

pub mod browse;
pub mod source;

pub use browse::{
    BrowseAction, BrowseService, FetchOutcome, FetchSequencer, FetchTicket, apply,
    create_flat_tree, has_selection, reduce, selected_items_for_actions, selection_state,
};
pub use source::{BulkActionTarget, ItemSource, MemorySource};

//! Browse tree state: actions, reducers, selectors, and the service that
//! drives them.

pub mod actions;
pub mod fetch;
pub mod reducers;
pub mod selectors;
pub mod service;

pub use actions::BrowseAction;
pub use fetch::{FetchSequencer, FetchTicket};
pub use reducers::{apply, reduce};
pub use selectors::{
    create_flat_tree, has_selection, selected_items_for_actions, selection_state,
};
pub use service::{BrowseService, FetchOutcome};

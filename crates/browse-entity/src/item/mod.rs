//! Browse tree items.

pub mod kind;
pub mod model;

pub use kind::DashboardViewItemKind;
pub use model::{DashboardViewItem, ItemRef};

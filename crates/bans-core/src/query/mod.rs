//! Query specifications - immutable descriptions built before any I/O

mod draft;
mod selection;

pub use draft::{DraftPunishment, DraftPunishmentBuilder};
pub use selection::{SelectionOrder, SelectionOrderBuilder};

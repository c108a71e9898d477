//! Interactive components hosted by form screens.
//!
//! These hold state and react to keys; drawing lives in
//! [`crate::tui::components`].

pub mod search;
pub mod select;

use std::sync::Arc;

use crate::options::SelectOption;

pub use search::{ClearBehavior, DebouncedSearch, SearchEvent, SearchPhase, SearchSettings};
pub use select::SelectableList;

/// Formatter turning an option into display text.
pub type LabelFn = Arc<dyn Fn(&SelectOption) -> String + Send + Sync>;

fn default_label() -> LabelFn {
    Arc::new(SelectOption::display_label)
}

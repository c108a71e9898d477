//! Core crate exports for building and running the `adwiz` campaign form.
//!
//! The root module re-exports the widgets, lookup sources and form host so
//! that embedders can assemble a form without digging through the module
//! hierarchy.

pub mod app_dirs;
pub mod client;
pub mod logging;
pub mod options;
mod systems;
pub mod tui;
pub mod ui;
pub mod widgets;

pub use client::{EntityKind, EntitySearchClient, PlacesClient, SearchError, SearchResponse};
pub use options::{MultiSelection, OptionRecord, SelectOption, matches_selection};
pub use systems::search::{Debounce, SharedSource, SuggestionSource};
pub use tui::Theme;
pub use ui::{App, FormOutcome, FormUi, run};
pub use widgets::{DebouncedSearch, SearchEvent, SearchPhase, SearchSettings, SelectableList};

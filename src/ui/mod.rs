//! The campaign-targeting form.
//!
//! [`FormUi`] collects the option lists and lookup sources, [`App`] owns the
//! widget state and turns their events into a [`FormOutcome`], and the
//! runtime drives it against a real terminal.

mod actions;
mod builder;
mod render;
mod runtime;
mod state;

pub use builder::FormUi;
pub use runtime::run;
pub use state::{App, Focus, FormOutcome, Notice};

//! Terminal rendering for the form widgets.
//!
//! Components here only draw. State and key handling live in
//! [`crate::widgets`], and the screen that arranges them lives in
//! [`crate::ui`].

pub mod components;
pub mod theme;

pub use theme::Theme;

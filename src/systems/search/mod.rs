//! Background lookup plumbing shared by the remote search widgets.

mod commands;
mod debounce;
mod runtime;
mod source;
mod worker;

pub(crate) use commands::{LookupPayload, LookupReply, LookupRequest};
pub use debounce::Debounce;
pub(crate) use runtime::LookupRuntime;
pub use source::{SharedSource, SuggestionSource};

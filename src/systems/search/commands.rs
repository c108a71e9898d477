use crate::client::SearchError;
use crate::options::SelectOption;

/// Work handed to a lookup thread.
#[derive(Debug, Clone)]
pub(crate) enum LookupRequest {
    /// Fetch suggestions for the provided query text.
    Suggest(String),
    /// Resolve the full record for a chosen suggestion.
    Details(SelectOption),
}

/// What a lookup thread produced.
#[derive(Debug)]
pub(crate) enum LookupPayload {
    Suggestions(Result<Vec<SelectOption>, SearchError>),
    Details {
        /// The suggestion the user picked.
        option: SelectOption,
        result: Result<SelectOption, SearchError>,
    },
}

/// Reply sent back to the owning widget.
#[derive(Debug)]
pub(crate) struct LookupReply {
    /// Identifier that lets the widget correlate the reply with the request that produced it.
    pub id: u64,
    pub payload: LookupPayload,
}

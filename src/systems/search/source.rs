use std::sync::Arc;

use crate::client::SearchError;
use crate::options::SelectOption;

/// Remote lookup backing a debounced search widget.
///
/// Implementations block; the widget calls them from background threads.
pub trait SuggestionSource: Send + Sync {
    /// Suggestions for `query`, in display order.
    fn suggest(&self, query: &str) -> Result<Vec<SelectOption>, SearchError>;

    /// Enrich a chosen suggestion before it is handed to the caller.
    ///
    /// Only consulted when the widget is configured with a detail lookup.
    fn details(&self, option: &SelectOption) -> Result<SelectOption, SearchError> {
        Ok(option.clone())
    }
}

impl<F> SuggestionSource for F
where
    F: Fn(&str) -> Result<Vec<SelectOption>, SearchError> + Send + Sync,
{
    fn suggest(&self, query: &str) -> Result<Vec<SelectOption>, SearchError> {
        self(query)
    }
}

pub type SharedSource = Arc<dyn SuggestionSource>;

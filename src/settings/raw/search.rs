use std::time::Duration;

use adwiz::client::DEFAULT_TIMEOUT;
use adwiz::widgets::SearchSettings;
use serde::Deserialize;

use super::super::resolved::SearchTuning;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(in crate::settings) struct SearchSection {
    pub(in crate::settings) min_query_length: Option<usize>,
    pub(in crate::settings) place_debounce_ms: Option<u64>,
    pub(in crate::settings) entity_debounce_ms: Option<u64>,
    pub(in crate::settings) request_timeout_secs: Option<u64>,
}

impl SearchSection {
    pub(super) fn resolve(self) -> SearchTuning {
        SearchTuning {
            min_query_length: self
                .min_query_length
                .unwrap_or(SearchSettings::DEFAULT_MIN_QUERY_LENGTH),
            place_debounce: self
                .place_debounce_ms
                .map_or(SearchSettings::PLACE_DEBOUNCE, Duration::from_millis),
            entity_debounce: self
                .entity_debounce_ms
                .map_or(SearchSettings::ENTITY_DEBOUNCE, Duration::from_millis),
            request_timeout: self
                .request_timeout_secs
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
        }
    }
}

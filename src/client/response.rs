use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SearchError;
use crate::options::SelectOption;

/// Normalized result of a remote search call.
///
/// Wrappers never return errors directly; callers inspect `success` and read
/// `error` for a message suitable for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Value>,
}

impl SearchResponse {
    #[must_use]
    pub fn ok(data: Vec<SelectOption>, paging: Option<Value>) -> Self {
        Self {
            success: true,
            data,
            error: None,
            paging,
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            error: Some(message.into()),
            paging: None,
        }
    }

    pub fn into_result(self) -> Result<Vec<SelectOption>, SearchError> {
        if self.success {
            Ok(self.data)
        } else {
            let message = self.error.unwrap_or_else(|| "search failed".to_string());
            Err(SearchError::upstream(None, message))
        }
    }
}

impl From<SearchError> for SearchResponse {
    fn from(err: SearchError) -> Self {
        Self::failure(err.to_string())
    }
}

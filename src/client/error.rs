use thiserror::Error;

/// Failures surfaced by the remote search wrappers and suggestion sources.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// No access credential was supplied for an authenticated lookup.
    #[error("Access token is required")]
    MissingCredential,

    /// The query text was empty.
    #[error("Search query is required")]
    MissingQuery,

    /// The lookup category is not one of the supported entity kinds.
    #[error("Invalid type '{0}'. Expected one of: adworkposition, adinterest, adworkemployer")]
    InvalidKind(String),

    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),

    /// The upstream service answered with an error.
    #[error("{message}")]
    Upstream { status: Option<u16>, message: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl SearchError {
    pub(crate) fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Whether the request was rejected before any network call was made.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::MissingQuery | Self::InvalidKind(_)
        )
    }
}

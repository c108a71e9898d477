use std::sync::Arc;

use crate::client::{EntityKind, EntitySearchClient, PlacesClient, SearchError};
use crate::options::SelectOption;
use crate::systems::search::SuggestionSource;

/// Entity search bound to one credential and category.
#[derive(Debug, Clone)]
pub struct EntitySource {
    client: Arc<EntitySearchClient>,
    credential: String,
    kind: EntityKind,
}

impl EntitySource {
    pub fn new(
        client: Arc<EntitySearchClient>,
        credential: impl Into<String>,
        kind: EntityKind,
    ) -> Self {
        Self {
            client,
            credential: credential.into(),
            kind,
        }
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }
}

impl SuggestionSource for EntitySource {
    fn suggest(&self, query: &str) -> Result<Vec<SelectOption>, SearchError> {
        self.client
            .search(&self.credential, self.kind.as_str(), query)
            .into_result()
    }
}

/// Place autocomplete that resolves coordinates once a prediction is chosen.
#[derive(Debug, Clone)]
pub struct PlaceSource {
    client: PlacesClient,
}

impl PlaceSource {
    #[must_use]
    pub fn new(client: PlacesClient) -> Self {
        Self { client }
    }
}

impl SuggestionSource for PlaceSource {
    fn suggest(&self, query: &str) -> Result<Vec<SelectOption>, SearchError> {
        self.client.autocomplete(query)
    }

    fn details(&self, option: &SelectOption) -> Result<SelectOption, SearchError> {
        let place_id = option
            .id()
            .and_then(|id| id.as_str())
            .ok_or_else(|| SearchError::Decode("selected place has no id".to_string()))?;
        self.client.details(place_id)
    }
}

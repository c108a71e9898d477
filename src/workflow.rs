use std::sync::Arc;

use adwiz::client::{EntitySearchClient, EntitySource, PlaceSource, PlacesClient};
use adwiz::ui::{FormOutcome, FormUi};
use adwiz::widgets::SearchSettings;
use anyhow::{Context, Result};
use tracing::info;

use crate::settings::ResolvedConfig;

/// Coordinates building and running the interactive campaign form.
pub(crate) struct FormWorkflow {
    form: FormUi,
}

impl FormWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
        let form = FormFactory::build(config)?;
        Ok(Self { form })
    }

    pub(crate) fn run(self) -> Result<FormOutcome> {
        self.form.run()
    }
}

/// Translates resolved configuration into a configured [`FormUi`].
struct FormFactory;

impl FormFactory {
    fn build(config: ResolvedConfig) -> Result<FormUi> {
        let ResolvedConfig {
            search,
            entity,
            places,
            ui,
            ..
        } = config;

        let mut form = FormUi::new(ui.objectives).with_title(ui.title);
        if let Some(theme) = ui.theme.as_deref() {
            form = form.with_theme_name(theme);
        }

        match places.api_key {
            Some(key) => {
                let client = PlacesClient::new(places.endpoint, key, search.request_timeout)
                    .context("failed to build the places client")?;
                let settings = SearchSettings::places()
                    .with_min_query_length(search.min_query_length)
                    .with_debounce(search.place_debounce);
                form = form.with_location(Arc::new(PlaceSource::new(client)), settings);
            }
            None => info!("no places key configured; location search disabled"),
        }

        match entity.access_token {
            Some(token) => {
                let client = EntitySearchClient::new(entity.endpoint, search.request_timeout)
                    .context("failed to build the entity search client")?;
                let source = EntitySource::new(Arc::new(client), token, entity.kind);
                let settings = SearchSettings::entities()
                    .with_min_query_length(search.min_query_length)
                    .with_debounce(search.entity_debounce);
                form = form.with_targeting(entity.kind.title(), Arc::new(source), settings);
            }
            None => info!("no access token configured; targeting search disabled"),
        }

        Ok(form)
    }
}

use adwiz::client::{DEFAULT_ENTITY_ENDPOINT, DEFAULT_PLACES_ENDPOINT, EntityKind};
use serde::Deserialize;
use url::Url;

use crate::cli::CliArgs;

use super::super::resolved::{ConfigError, ConfigSources, EntitySettings, PlacesSettings};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(in crate::settings) struct EntitySection {
    pub(in crate::settings) endpoint: Option<String>,
    pub(in crate::settings) access_token: Option<String>,
    pub(in crate::settings) kind: Option<String>,
}

impl EntitySection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(token) = &cli.access_token {
            self.access_token = Some(token.clone());
        }
        if let Some(kind) = cli.entity_kind {
            self.kind = Some(kind.kind().as_str().to_string());
        }
    }

    pub(super) fn resolve(self, sources: &ConfigSources) -> Result<EntitySettings, ConfigError> {
        let endpoint = parse_endpoint(
            self.endpoint.as_deref(),
            DEFAULT_ENTITY_ENDPOINT,
            "entity.endpoint",
            sources,
        )?;
        let kind = match self.kind.as_deref() {
            None => EntityKind::Interest,
            Some(raw) => EntityKind::parse(raw).map_err(|err| {
                ConfigError::invalid(
                    "entity.kind",
                    raw,
                    sources.source_for("entity.kind"),
                    err.to_string(),
                )
            })?,
        };

        Ok(EntitySettings {
            endpoint,
            access_token: non_blank(self.access_token),
            kind,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(in crate::settings) struct PlacesSection {
    pub(in crate::settings) endpoint: Option<String>,
    pub(in crate::settings) api_key: Option<String>,
}

impl PlacesSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(key) = &cli.places_key {
            self.api_key = Some(key.clone());
        }
    }

    pub(super) fn resolve(self, sources: &ConfigSources) -> Result<PlacesSettings, ConfigError> {
        Ok(PlacesSettings {
            endpoint: parse_endpoint(
                self.endpoint.as_deref(),
                DEFAULT_PLACES_ENDPOINT,
                "places.endpoint",
                sources,
            )?,
            api_key: non_blank(self.api_key),
        })
    }
}

fn parse_endpoint(
    value: Option<&str>,
    default: &str,
    key: &'static str,
    sources: &ConfigSources,
) -> Result<Url, ConfigError> {
    let raw = value.map(str::trim).unwrap_or(default);
    Url::parse(raw).map_err(|err| {
        ConfigError::invalid(key, raw, sources.source_for(key), err.to_string())
    })
}

/// Blank secrets count as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

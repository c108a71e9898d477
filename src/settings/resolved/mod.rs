use std::time::Duration;

use adwiz::client::EntityKind;
use adwiz::logging::LoggingOptions;
use adwiz::options::SelectOption;
use url::Url;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// sensible defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub search: SearchTuning,
    pub entity: EntitySettings,
    pub places: PlacesSettings,
    pub ui: UiSettings,
    pub logging: LoggingOptions,
}

/// Timing shared by both search fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTuning {
    pub min_query_length: usize,
    pub place_debounce: Duration,
    pub entity_debounce: Duration,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct EntitySettings {
    pub endpoint: Url,
    /// Targeting is hidden when absent.
    pub access_token: Option<String>,
    pub kind: EntityKind,
}

#[derive(Debug, Clone)]
pub struct PlacesSettings {
    pub endpoint: Url,
    /// The location row is hidden when absent.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UiSettings {
    pub title: String,
    pub theme: Option<String>,
    pub objectives: Vec<SelectOption>,
}

impl ResolvedConfig {
    pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
        validation::validate(self, sources)
    }

    /// Print a human readable summary of the effective configuration.
    pub fn print_summary(&self) {
        print!("{}", summary::render_summary(self));
    }
}

#[cfg(test)]
pub(super) fn sample() -> ResolvedConfig {
    use adwiz::client::{DEFAULT_ENTITY_ENDPOINT, DEFAULT_PLACES_ENDPOINT, DEFAULT_TIMEOUT};

    ResolvedConfig {
        search: SearchTuning {
            min_query_length: 2,
            place_debounce: Duration::from_millis(300),
            entity_debounce: Duration::from_millis(500),
            request_timeout: DEFAULT_TIMEOUT,
        },
        entity: EntitySettings {
            endpoint: Url::parse(DEFAULT_ENTITY_ENDPOINT).expect("entity url"),
            access_token: Some("token-secret".into()),
            kind: EntityKind::Interest,
        },
        places: PlacesSettings {
            endpoint: Url::parse(DEFAULT_PLACES_ENDPOINT).expect("places url"),
            api_key: None,
        },
        ui: UiSettings {
            title: "New campaign".into(),
            theme: None,
            objectives: vec![SelectOption::plain("Call")],
        },
        logging: LoggingOptions::default(),
    }
}

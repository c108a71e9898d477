use anyhow::{Error, Result};
use serde::Deserialize;
use std::env;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod search;
mod services;
mod ui;

use search::SearchSection;
use services::{EntitySection, PlacesSection};
use ui::{LoggingSection, UiSection};

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    pub(super) search: SearchSection,
    pub(super) entity: EntitySection,
    pub(super) places: PlacesSection,
    pub(super) ui: UiSection,
    pub(super) logging: LoggingSection,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        self.entity.apply_cli_overrides(cli);
        self.places.apply_cli_overrides(cli);
        self.ui.apply_cli_overrides(cli);
        self.logging.apply_cli_overrides(cli);
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let sources = self.detect_sources(cli);

        let config = ResolvedConfig {
            search: self.search.resolve(),
            entity: self.entity.resolve(&sources).map_err(Error::new)?,
            places: self.places.resolve(&sources).map_err(Error::new)?,
            ui: self.ui.resolve(&sources).map_err(Error::new)?,
            logging: self.logging.resolve(),
        };

        config.validate(&sources).map_err(Error::new)?;

        Ok(config)
    }

    fn detect_sources(&self, cli: &CliArgs) -> ConfigSources {
        let mut sources = ConfigSources::default();
        let search = &self.search;
        let checks = [
            (
                "search.min_query_length",
                search.min_query_length.is_some(),
                None,
            ),
            (
                "search.place_debounce_ms",
                search.place_debounce_ms.is_some(),
                None,
            ),
            (
                "search.entity_debounce_ms",
                search.entity_debounce_ms.is_some(),
                None,
            ),
            (
                "search.request_timeout_secs",
                search.request_timeout_secs.is_some(),
                None,
            ),
            ("entity.endpoint", self.entity.endpoint.is_some(), None),
            (
                "entity.kind",
                self.entity.kind.is_some(),
                cli.entity_kind.is_some().then_some("--entity-kind"),
            ),
            ("places.endpoint", self.places.endpoint.is_some(), None),
            (
                "ui.theme",
                self.ui.theme.is_some(),
                cli.theme.is_some().then_some("--theme"),
            ),
            ("ui.objectives", self.ui.objectives.is_some(), None),
            (
                "logging.level",
                self.logging.level.is_some(),
                cli.log_level.is_some().then_some("--log-level"),
            ),
        ];

        for (key, value_present, cli_flag) in checks {
            if let Some(source) = detect_source(cli_flag, value_present, key) {
                sources.record(key, source);
            }
        }
        sources
    }
}

/// Environment variable that sets `key`, e.g. `ADWIZ__SEARCH__MIN_QUERY_LENGTH`.
pub(super) fn env_var_for(key: &str) -> String {
    format!(
        "{}__{}",
        super::sources::ENV_PREFIX.to_uppercase(),
        key.replace('.', "__").to_uppercase()
    )
}

fn detect_source(
    cli_flag: Option<&'static str>,
    value_present: bool,
    key: &'static str,
) -> Option<SettingSource> {
    if !value_present {
        return None;
    }

    if let Some(flag) = cli_flag {
        return Some(SettingSource::CliFlag(flag));
    }

    let env_var = env_var_for(key);
    if env::var_os(&env_var).is_some() {
        return Some(SettingSource::Environment(env_var));
    }

    Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;

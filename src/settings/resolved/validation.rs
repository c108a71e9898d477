use std::time::Duration;

use adwiz::logging::parse_log_level;
use adwiz::tui::theme;

use super::{ConfigError, ConfigSources, ResolvedConfig};

pub(super) fn validate(
    config: &ResolvedConfig,
    sources: &ConfigSources,
) -> Result<(), ConfigError> {
    let search = &config.search;
    if search.min_query_length == 0 {
        return Err(ConfigError::invalid(
            "search.min_query_length",
            "0",
            sources.source_for("search.min_query_length"),
            "must be at least 1",
        ));
    }

    positive("search.place_debounce_ms", search.place_debounce, sources)?;
    positive("search.entity_debounce_ms", search.entity_debounce, sources)?;
    positive("search.request_timeout_secs", search.request_timeout, sources)?;

    if let Some(name) = &config.ui.theme
        && theme::by_name(name).is_none()
    {
        return Err(ConfigError::invalid(
            "ui.theme",
            name.as_str(),
            sources.source_for("ui.theme"),
            format!("unknown theme; expected one of: {}", theme::names().join(", ")),
        ));
    }

    if let Err(err) = parse_log_level(&config.logging.level) {
        return Err(ConfigError::invalid(
            "logging.level",
            config.logging.level.as_str(),
            sources.source_for("logging.level"),
            err.to_string(),
        ));
    }

    Ok(())
}

fn positive(
    key: &'static str,
    value: Duration,
    sources: &ConfigSources,
) -> Result<(), ConfigError> {
    if value.is_zero() {
        return Err(ConfigError::invalid(
            key,
            "0",
            sources.source_for(key),
            "must be greater than zero",
        ));
    }
    Ok(())
}

use std::collections::HashSet;
use std::path::PathBuf;

use adwiz::logging::{DEFAULT_LEVEL, LoggingOptions};
use adwiz::options::{OptionRecord, SelectOption};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::super::resolved::{ConfigError, ConfigSources, UiSettings};

pub(in crate::settings) const DEFAULT_TITLE: &str = "New campaign";
pub(in crate::settings) const DEFAULT_OBJECTIVES: [&str; 4] =
    ["Call", "Lead Form", "Link", "WhatsApp"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(in crate::settings) struct UiSection {
    pub(in crate::settings) title: Option<String>,
    pub(in crate::settings) theme: Option<String>,
    pub(in crate::settings) objectives: Option<Vec<String>>,
}

impl UiSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(title) = &cli.title {
            self.title = Some(title.clone());
        }
        if let Some(theme) = &cli.theme {
            self.theme = Some(theme.clone());
        }
    }

    pub(super) fn resolve(self, sources: &ConfigSources) -> Result<UiSettings, ConfigError> {
        let objectives = match self.objectives {
            None => DEFAULT_OBJECTIVES.into_iter().map(objective).collect(),
            Some(labels) => objectives_from(&labels, sources)?,
        };

        Ok(UiSettings {
            title: self
                .title
                .map(|title| title.trim().to_string())
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            theme: self.theme,
            objectives,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(in crate::settings) struct LoggingSection {
    pub(in crate::settings) level: Option<String>,
    pub(in crate::settings) file: Option<PathBuf>,
}

impl LoggingSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(level) = &cli.log_level {
            self.level = Some(level.clone());
        }
    }

    pub(super) fn resolve(self) -> LoggingOptions {
        LoggingOptions {
            level: self.level.unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
            file: self.file,
        }
    }
}

fn objectives_from(
    labels: &[String],
    sources: &ConfigSources,
) -> Result<Vec<SelectOption>, ConfigError> {
    let invalid = |value: String, reason: &str| {
        ConfigError::invalid(
            "ui.objectives",
            value,
            sources.source_for("ui.objectives"),
            reason,
        )
    };

    if labels.is_empty() {
        return Err(invalid(String::new(), "must list at least one objective"));
    }

    let mut seen = HashSet::new();
    let mut options = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.trim();
        let code = objective_code(label);
        if code.is_empty() {
            return Err(invalid(
                label.to_string(),
                "objective labels must contain letters or digits",
            ));
        }
        if !seen.insert(code.clone()) {
            return Err(invalid(label.to_string(), "objectives must be unique"));
        }
        options.push(objective(label));
    }
    Ok(options)
}

fn objective(label: &str) -> SelectOption {
    OptionRecord::new()
        .with_value(objective_code(label))
        .with_label(label)
        .into()
}

/// `"Lead Form"` becomes `"LEAD_FORM"`.
pub(in crate::settings) fn objective_code(label: &str) -> String {
    label
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("_")
}

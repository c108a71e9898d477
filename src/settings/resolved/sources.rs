use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
    CliFlag(&'static str),
    Environment(String),
    ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
            Self::Environment(var) => write!(f, "environment variable `{var}`"),
            Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
        }
    }
}

/// Where each explicitly set key came from.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
    origins: HashMap<&'static str, SettingSource>,
}

impl ConfigSources {
    pub(crate) fn record(&mut self, key: &'static str, source: SettingSource) {
        self.origins.insert(key, source);
    }

    pub(crate) fn source_for(&self, key: &'static str) -> SettingSource {
        self.origins
            .get(key)
            .cloned()
            .unwrap_or(SettingSource::ConfigKey(key))
    }
}

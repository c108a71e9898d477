use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::{EntityKindArg, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `adwiz` binary.
#[derive(Parser, Debug)]
#[command(
    name = "adwiz",
    version,
    long_version = long_version(),
    about = "Interactive campaign targeting form with remote place and audience search",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "ADWIZ_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'a',
        long = "access-token",
        value_name = "TOKEN",
        env = "ADWIZ_ACCESS_TOKEN",
        hide_env_values = true,
        help = "Access token for audience search (default: from configuration)"
    )]
    pub(crate) access_token: Option<String>,
    #[arg(
        short = 'k',
        long = "places-key",
        value_name = "KEY",
        env = "ADWIZ_PLACES_KEY",
        hide_env_values = true,
        help = "API key for place autocomplete; enables the location row (default: unset)"
    )]
    pub(crate) places_key: Option<String>,
    #[arg(
        short = 'e',
        long = "entity-kind",
        value_enum,
        help = "Audience category to search (default: interest)"
    )]
    pub(crate) entity_kind: Option<EntityKindArg>,
    #[arg(
        short = 't',
        long,
        value_name = "TITLE",
        help = "Set the form title (default: New campaign)"
    )]
    pub(crate) title: Option<String>,
    #[arg(
        long,
        value_name = "THEME",
        help = "Select a theme by name (default: slate)"
    )]
    pub(crate) theme: Option<String>,
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        help = "Log level written to the log file (default: info)"
    )]
    pub(crate) log_level: Option<String>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'l',
        long = "list-themes",
        help = "List supported themes and exit (default: disabled)"
    )]
    pub(crate) list_themes: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to print the result"
    )]
    pub(crate) output: OutputFormat,
}

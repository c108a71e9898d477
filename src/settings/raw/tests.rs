use std::time::Duration;

use adwiz::client::EntityKind;
use clap::Parser;

use super::ui::{DEFAULT_OBJECTIVES, objective_code};
use super::{RawConfig, env_var_for};
use crate::cli::CliArgs;

fn cli(args: &[&str]) -> CliArgs {
    let mut argv = vec!["adwiz", "--no-config"];
    argv.extend_from_slice(args);
    CliArgs::parse_from(argv)
}

#[test]
fn cli_overrides_take_precedence() {
    let args = cli(&[
        "--access-token",
        "token-123",
        "--places-key",
        "key-456",
        "--entity-kind",
        "employer",
        "--title",
        "Spring push",
        "--theme",
        "light",
        "--log-level",
        "debug",
    ]);

    let mut config = RawConfig::default();
    config.entity.access_token = Some("from-file".into());
    config.ui.title = Some("From file".into());
    config.apply_cli_overrides(&args);

    assert_eq!(config.entity.access_token.as_deref(), Some("token-123"));
    assert_eq!(config.entity.kind.as_deref(), Some("adworkemployer"));
    assert_eq!(config.places.api_key.as_deref(), Some("key-456"));
    assert_eq!(config.ui.title.as_deref(), Some("Spring push"));
    assert_eq!(config.ui.theme.as_deref(), Some("light"));
    assert_eq!(config.logging.level.as_deref(), Some("debug"));
}

#[test]
fn defaults_resolve_without_any_input() {
    let resolved = RawConfig::default().resolve(&cli(&[])).expect("resolves");

    assert_eq!(resolved.search.min_query_length, 2);
    assert_eq!(resolved.search.place_debounce, Duration::from_millis(300));
    assert_eq!(resolved.search.entity_debounce, Duration::from_millis(500));
    assert_eq!(resolved.search.request_timeout, Duration::from_secs(10));
    assert_eq!(resolved.entity.kind, EntityKind::Interest);
    assert!(resolved.entity.access_token.is_none());
    assert!(resolved.places.api_key.is_none());
    assert_eq!(resolved.ui.title, "New campaign");
    assert_eq!(resolved.logging.level, "info");

    let labels: Vec<_> = resolved
        .ui
        .objectives
        .iter()
        .map(|option| option.display_label())
        .collect();
    assert_eq!(labels, DEFAULT_OBJECTIVES);
    assert_eq!(
        resolved.ui.objectives[1].value().and_then(|value| value.as_str()),
        Some("LEAD_FORM")
    );
}

#[test]
fn blank_secrets_are_treated_as_missing() {
    let mut config = RawConfig::default();
    config.entity.access_token = Some("   ".into());
    config.places.api_key = Some(String::new());

    let resolved = config.resolve(&cli(&[])).expect("resolves");
    assert!(resolved.entity.access_token.is_none());
    assert!(resolved.places.api_key.is_none());
}

#[test]
fn unknown_kinds_are_rejected() {
    let mut config = RawConfig::default();
    config.entity.kind = Some("adbogus".into());

    let message = config.resolve(&cli(&[])).unwrap_err().to_string();
    assert!(message.contains("entity.kind"));
    assert!(message.contains("value: adbogus"));
}

#[test]
fn malformed_endpoints_are_rejected() {
    let mut config = RawConfig::default();
    config.places.endpoint = Some("not a url".into());

    let message = config.resolve(&cli(&[])).unwrap_err().to_string();
    assert!(message.contains("places.endpoint"));
}

#[test]
fn zero_debounce_is_rejected() {
    let mut config = RawConfig::default();
    config.search.entity_debounce_ms = Some(0);

    let message = config.resolve(&cli(&[])).unwrap_err().to_string();
    assert!(message.contains("search.entity_debounce_ms"));
    assert!(message.contains("configuration key"));
}

#[test]
fn duplicate_objectives_are_rejected() {
    let mut config = RawConfig::default();
    config.ui.objectives = Some(vec!["Lead form".into(), "lead-form".into()]);

    let message = config.resolve(&cli(&[])).unwrap_err().to_string();
    assert!(message.contains("must be unique"));
}

#[test]
fn cli_theme_errors_name_the_flag() {
    let args = cli(&["--theme", "neon"]);
    let mut config = RawConfig::default();
    config.apply_cli_overrides(&args);

    let message = config.resolve(&args).unwrap_err().to_string();
    assert!(message.contains("CLI flag `--theme`"));
}

#[test]
fn objective_codes_are_upper_snake_case() {
    assert_eq!(objective_code("Lead Form"), "LEAD_FORM");
    assert_eq!(objective_code("WhatsApp"), "WHATSAPP");
    assert_eq!(objective_code("  link-click "), "LINK_CLICK");
    assert_eq!(objective_code("--"), "");
}

#[test]
fn env_var_names_follow_the_prefix() {
    assert_eq!(
        env_var_for("search.min_query_length"),
        "ADWIZ__SEARCH__MIN_QUERY_LENGTH"
    );
}

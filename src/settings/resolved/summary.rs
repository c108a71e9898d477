use std::fmt::Write;
use std::time::Duration;

use super::ResolvedConfig;

pub(super) fn render_summary(config: &ResolvedConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Effective configuration:");
    let _ = writeln!(out, "  Title: {}", config.ui.title);
    let _ = writeln!(
        out,
        "  Theme: {}",
        config.ui.theme.as_deref().unwrap_or("(default)")
    );
    let objectives: Vec<_> = config
        .ui
        .objectives
        .iter()
        .map(|option| option.display_label())
        .collect();
    let _ = writeln!(out, "  Objectives: {}", objectives.join(", "));
    let _ = writeln!(
        out,
        "  Min query length: {}",
        config.search.min_query_length
    );
    let _ = writeln!(
        out,
        "  Place debounce: {}",
        millis(config.search.place_debounce)
    );
    let _ = writeln!(
        out,
        "  Entity debounce: {}",
        millis(config.search.entity_debounce)
    );
    let _ = writeln!(
        out,
        "  Request timeout: {}s",
        config.search.request_timeout.as_secs()
    );
    let _ = writeln!(out, "  Entity endpoint: {}", config.entity.endpoint);
    let _ = writeln!(out, "  Entity kind: {}", config.entity.kind);
    let _ = writeln!(
        out,
        "  Access token: {}",
        secret(config.entity.access_token.as_deref())
    );
    let _ = writeln!(out, "  Places endpoint: {}", config.places.endpoint);
    let _ = writeln!(
        out,
        "  Places key: {}",
        secret(config.places.api_key.as_deref())
    );
    let _ = writeln!(out, "  Log level: {}", config.logging.level);
    match &config.logging.file {
        Some(file) => {
            let _ = writeln!(out, "  Log file: {}", file.display());
        }
        None => {
            let _ = writeln!(out, "  Log file: (data directory)");
        }
    }
    out
}

fn secret(value: Option<&str>) -> &'static str {
    if value.is_some() { "(set)" } else { "(not set)" }
}

fn millis(value: Duration) -> String {
    format!("{}ms", value.as_millis())
}

use serde_json::Value;

use super::SelectOption;

/// Row label for targeting entities: the entity name followed by its reach.
///
/// Reach comes from `audience_size`, the `audience_size_*_bound` pair, or the
/// `coverage_*_bound` pair, whichever is present first.
#[must_use]
pub fn format_audience_row(option: &SelectOption) -> String {
    let name = entity_name(option);
    match audience_reach(option) {
        Some(reach) => format!("{name} · {reach}"),
        None => name,
    }
}

/// The entity `name`, falling back to the display label.
#[must_use]
pub fn entity_name(option: &SelectOption) -> String {
    option
        .field_str("name")
        .map(str::to_string)
        .unwrap_or_else(|| option.display_label())
}

fn audience_reach(option: &SelectOption) -> Option<String> {
    if let Some(size) = option.field("audience_size").and_then(as_count) {
        return Some(compact_count(size));
    }
    for (lower, upper) in [
        ("audience_size_lower_bound", "audience_size_upper_bound"),
        ("coverage_lower_bound", "coverage_upper_bound"),
    ] {
        let lower = option.field(lower).and_then(as_count);
        let upper = option.field(upper).and_then(as_count);
        match (lower, upper) {
            (Some(lower), Some(upper)) if lower != upper => {
                return Some(format!("{}-{}", compact_count(lower), compact_count(upper)));
            }
            (Some(count), _) | (None, Some(count)) => return Some(compact_count(count)),
            (None, None) => {}
        }
    }
    None
}

fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Render a count with a K/M/B suffix and at most one decimal.
#[must_use]
pub fn compact_count(count: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];

    for (scale, suffix) in UNITS {
        if count >= scale {
            let scaled = format!("{:.1}", count as f64 / scale as f64);
            let trimmed = scaled.strip_suffix(".0").unwrap_or(&scaled);
            return format!("{trimmed}{suffix}");
        }
    }
    count.to_string()
}

use adwiz::options::{SelectOption, entity_name};
use adwiz::ui::FormOutcome;
use anyhow::Result;

/// Print a plain-text representation of the form outcome.
pub(crate) fn print_plain(outcome: &FormOutcome) {
    print!("{}", format_plain(outcome));
}

pub(crate) fn format_plain(outcome: &FormOutcome) -> String {
    if !outcome.accepted {
        return "Form cancelled\n".to_string();
    }

    let mut lines = vec![format!(
        "Objective: {}",
        outcome
            .objective
            .as_ref()
            .map_or_else(|| "(none)".to_string(), SelectOption::display_label)
    )];
    if let Some(location) = &outcome.location {
        lines.push(format!("Location: {}", location_line(location)));
    }
    if outcome.tags.is_empty() {
        lines.push("Targeting: (none)".to_string());
    } else {
        let names: Vec<_> = outcome.tags.iter().map(entity_name).collect();
        lines.push(format!("Targeting: {}", names.join(", ")));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn location_line(location: &SelectOption) -> String {
    let label = location.display_label();
    let latitude = location.field("latitude").and_then(|value| value.as_f64());
    let longitude = location.field("longitude").and_then(|value| value.as_f64());
    match (latitude, longitude) {
        (Some(lat), Some(lng)) => format!("{label} ({lat:.4}, {lng:.4})"),
        _ => label,
    }
}

/// Format the form outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &FormOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

/// Print the JSON representation of the form outcome.
pub(crate) fn print_json(outcome: &FormOutcome) -> Result<()> {
    println!("{}", format_outcome_json(outcome)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use adwiz::options::OptionRecord;
    use serde_json::Value;

    use super::*;

    fn accepted() -> FormOutcome {
        FormOutcome {
            accepted: true,
            objective: Some(
                OptionRecord::new()
                    .with_value("LEAD_FORM")
                    .with_label("Lead Form")
                    .into(),
            ),
            location: Some(
                OptionRecord::new()
                    .with_id("abc")
                    .with_label("Lisbon, Portugal")
                    .with_field("latitude", 38.7223)
                    .with_field("longitude", -9.1393)
                    .into(),
            ),
            tags: vec![
                OptionRecord::new()
                    .with_id("6003")
                    .with_field("name", "Surfing")
                    .into(),
            ],
        }
    }

    #[test]
    fn plain_output_lists_each_field() {
        let text = format_plain(&accepted());
        assert_eq!(
            text,
            concat!(
                "Objective: Lead Form\n",
                "Location: Lisbon, Portugal (38.7223, -9.1393)\n",
                "Targeting: Surfing\n",
            )
        );
    }

    #[test]
    fn cancelled_output_is_short() {
        let outcome = FormOutcome::default();
        assert_eq!(format_plain(&outcome), "Form cancelled\n");
    }

    #[test]
    fn json_output_keeps_extra_fields() {
        let json = format_outcome_json(&accepted()).expect("json");
        let value: Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["accepted"], Value::Bool(true));
        assert_eq!(value["objective"]["value"], "LEAD_FORM");
        assert_eq!(value["location"]["latitude"], 38.7223);
        assert_eq!(value["tags"][0]["name"], "Surfing");
    }
}

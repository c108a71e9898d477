use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;

use super::*;
use crate::client::SearchError;
use crate::options::OptionRecord;
use crate::systems::search::{SharedSource, SuggestionSource};
use crate::tui::components::buffer_text;
use crate::ui::FormUi;
use crate::widgets::SearchSettings;

const WINDOW: Duration = Duration::from_millis(50);

struct Places;

impl SuggestionSource for Places {
    fn suggest(&self, query: &str) -> Result<Vec<SelectOption>, SearchError> {
        Ok(vec![
            OptionRecord::new().with_id("lisbon").with_label(format!("{query} · Lisbon")).into(),
            OptionRecord::new().with_id("nowhere").with_label("Nowhere").into(),
        ])
    }

    fn details(&self, option: &SelectOption) -> Result<SelectOption, SearchError> {
        match option.id().and_then(|id| id.as_str()) {
            Some("lisbon") => {
                let record = option.as_record().cloned().unwrap_or_default();
                Ok(record.with_field("latitude", 38.72).into())
            }
            _ => Err(SearchError::upstream(Some(404), "NOT_FOUND")),
        }
    }
}

fn interests() -> SharedSource {
    Arc::new(|query: &str| -> Result<Vec<SelectOption>, SearchError> {
        Ok(vec![
            OptionRecord::new()
                .with_id("6003")
                .with_field("name", format!("{query} lovers"))
                .into(),
        ])
    })
}

fn objectives() -> Vec<SelectOption> {
    ["Call", "Lead Form", "Link", "WhatsApp"]
        .into_iter()
        .map(|label| OptionRecord::new().with_value(label).with_label(label).into())
        .collect()
}

fn app() -> App {
    FormUi::new(objectives())
        .with_location(Arc::new(Places), SearchSettings::places().with_debounce(WINDOW))
        .with_targeting(
            "Interests",
            interests(),
            SearchSettings::entities().with_debounce(WINDOW),
        )
        .into_app()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str, now: Instant) {
    for ch in text.chars() {
        assert_eq!(app.handle_key(key(KeyCode::Char(ch)), now), None);
    }
}

fn pump_until(app: &mut App, now: Instant, done: impl Fn(&App) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        app.pump(now);
        if done(app) {
            return;
        }
        assert!(Instant::now() < deadline, "form did not settle");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn tab_cycles_through_visible_rows() {
    let mut app = app();
    let now = Instant::now();
    assert_eq!(app.focus(), Focus::Objective);

    for expected in [Focus::Location, Focus::Targeting, Focus::Tags, Focus::Objective] {
        app.handle_key(key(KeyCode::Tab), now);
        assert_eq!(app.focus(), expected);
    }
    app.handle_key(key(KeyCode::BackTab), now);
    assert_eq!(app.focus(), Focus::Tags);

    let mut bare = FormUi::new(objectives()).into_app();
    bare.handle_key(key(KeyCode::Tab), now);
    assert_eq!(bare.focus(), Focus::Objective);
    assert_eq!(bare.focus_order(), vec![Focus::Objective]);
}

#[test]
fn choosing_an_objective_goes_through_the_modal() {
    let mut app = app();
    let now = Instant::now();

    app.handle_key(key(KeyCode::Enter), now);
    assert!(app.objective().is_open());
    app.handle_key(key(KeyCode::Down), now);
    app.handle_key(key(KeyCode::Enter), now);

    assert!(!app.objective().is_open());
    assert_eq!(app.objective().button_text(), "Lead Form");

    let outcome = app.handle_key(key(KeyCode::F(2)), now).expect("submitted");
    assert!(outcome.accepted);
    assert_eq!(
        outcome.objective.and_then(|o| o.label().map(str::to_string)),
        Some("Lead Form".into())
    );
}

#[test]
fn selected_places_become_the_location() {
    let mut app = app();
    let start = Instant::now();
    app.set_focus(Focus::Location);

    type_text(&mut app, "lis", start);
    pump_until(&mut app, start + WINDOW, |app| {
        app.location_search().is_some_and(|search| search.is_open())
    });
    app.handle_key(key(KeyCode::Enter), start + WINDOW);
    pump_until(&mut app, start + WINDOW, |app| app.location().is_some());

    let location = app.location().expect("location");
    assert_eq!(location.field("latitude"), Some(&json!(38.72)));
    assert_eq!(app.notice(), None);

    app.handle_key(key(KeyCode::Esc), start + WINDOW);
    assert_eq!(app.location(), None);
}

#[test]
fn detail_failures_block_input_until_dismissed() {
    let mut app = app();
    let start = Instant::now();
    app.set_focus(Focus::Location);

    type_text(&mut app, "lis", start);
    pump_until(&mut app, start + WINDOW, |app| {
        app.location_search().is_some_and(|search| search.is_open())
    });
    app.handle_key(key(KeyCode::Down), start + WINDOW);
    app.handle_key(key(KeyCode::Enter), start + WINDOW);
    pump_until(&mut app, start + WINDOW, |app| app.notice().is_some());

    let notice = app.notice().expect("notice").clone();
    assert!(notice.message.contains("NOT_FOUND"), "{notice:?}");
    assert_eq!(app.location(), None);

    assert_eq!(app.handle_key(key(KeyCode::F(2)), start + WINDOW), None);
    app.handle_key(key(KeyCode::Tab), start + WINDOW);
    assert_eq!(app.focus(), Focus::Location);

    app.handle_key(key(KeyCode::Enter), start + WINDOW);
    assert_eq!(app.notice(), None);
}

#[test]
fn targeting_results_accumulate_as_tags() {
    let mut app = app();
    let start = Instant::now();
    app.set_focus(Focus::Targeting);

    for round in 0..2 {
        let now = start + WINDOW * (round * 4);
        type_text(&mut app, "coffee", now);
        pump_until(&mut app, now + WINDOW, |app| {
            app.targeting_search().is_some_and(|search| search.is_open())
        });
        app.handle_key(key(KeyCode::Enter), now + WINDOW);
        assert_eq!(app.targeting_search().map(|search| search.text()), Some(""));
    }

    assert_eq!(app.tags().len(), 1);
    assert!(app.tags().contains_id(&json!("6003")));

    app.set_focus(Focus::Tags);
    app.handle_key(key(KeyCode::Backspace), start);
    assert!(app.tags().is_empty());
}

#[test]
fn tag_row_removes_the_picked_tag() {
    let mut app = app();
    let now = Instant::now();
    app.tags.add(SelectOption::plain("coffee"));
    for (id, name) in [("6003", "Surfing"), ("6004", "Nursing")] {
        app.tags
            .add(OptionRecord::new().with_id(id).with_field("name", name).into());
    }

    app.set_focus(Focus::Tags);
    assert_eq!(app.tag_cursor(), Some(2));

    app.handle_key(key(KeyCode::Left), now);
    app.handle_key(key(KeyCode::Delete), now);
    assert!(!app.tags().contains_id(&json!("6003")));
    assert!(app.tags().contains_id(&json!("6004")));
    assert_eq!(app.tag_cursor(), Some(1));

    app.handle_key(key(KeyCode::Left), now);
    app.handle_key(key(KeyCode::Left), now);
    app.handle_key(key(KeyCode::Backspace), now);
    assert_eq!(app.tags().len(), 1);
    assert_eq!(app.tag_cursor(), Some(0));

    app.handle_key(key(KeyCode::Backspace), now);
    assert!(app.tags().is_empty());
    assert_eq!(app.tag_cursor(), None);
    assert_eq!(app.handle_key(key(KeyCode::Backspace), now), None);
}

#[test]
fn escape_clears_a_field_before_cancelling() {
    let mut app = app();
    let now = Instant::now();
    app.set_focus(Focus::Targeting);
    type_text(&mut app, "co", now);

    assert_eq!(app.handle_key(key(KeyCode::Esc), now), None);
    assert_eq!(app.targeting_search().map(|search| search.text()), Some(""));

    let outcome = app.handle_key(key(KeyCode::Esc), now).expect("cancelled");
    assert!(!outcome.accepted);
    assert!(outcome.tags.is_empty());
}

#[test]
fn the_form_renders_every_row() {
    let mut app = app();
    let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
    terminal.draw(|frame| app.draw(frame)).expect("draw");

    let view = buffer_text(terminal.backend().buffer());
    for expected in [
        "New campaign",
        "Objective",
        "Choose an objective",
        "Location",
        "Interests",
        "No tags yet",
        "F2 submit",
    ] {
        assert!(view.contains(expected), "missing {expected:?} in\n{view}");
    }
}

#[test]
fn outcomes_serialize_to_json() {
    let outcome = FormOutcome {
        accepted: true,
        objective: Some(OptionRecord::new().with_value("CALL").with_label("Call").into()),
        location: None,
        tags: vec![SelectOption::plain("coffee")],
    };

    let value = serde_json::to_value(&outcome).expect("json");

    assert_eq!(
        value,
        json!({
            "accepted": true,
            "objective": { "value": "CALL", "label": "Call" },
            "location": null,
            "tags": ["coffee"],
        })
    );
}

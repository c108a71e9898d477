use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, info};

use super::state::{App, Focus, FormOutcome, Notice};
use crate::options::SelectOption;
use crate::widgets::{DebouncedSearch, SearchEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Location,
    Targeting,
}

impl App {
    /// Route a key press. Returns the outcome once the form is submitted or
    /// cancelled.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<FormOutcome> {
        if self.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.notice = None;
            }
            return None;
        }

        if self.objective.is_open() {
            if let Some(option) = self.objective.handle_key(key) {
                debug!(objective = %option.display_label(), "objective chosen");
            }
            return None;
        }

        match key.code {
            KeyCode::F(2) => {
                info!(tags = self.tags.len(), "form submitted");
                return Some(self.outcome(true));
            }
            KeyCode::Tab => {
                self.cycle_focus(1);
                return None;
            }
            KeyCode::BackTab => {
                self.cycle_focus(-1);
                return None;
            }
            KeyCode::Esc if !self.focused_field_has_input() => {
                info!("form cancelled");
                return Some(self.outcome(false));
            }
            _ => {}
        }

        match self.focus {
            Focus::Objective => {
                self.objective.handle_key(key);
            }
            Focus::Location => self.route_to(Field::Location, key, now),
            Focus::Targeting => self.route_to(Field::Targeting, key, now),
            Focus::Tags => self.handle_tag_key(key),
        }
        None
    }

    /// Advance timers and apply lookup replies. Call once per frame.
    pub fn pump(&mut self, now: Instant) {
        for field in [Field::Location, Field::Targeting] {
            let event = self
                .search_mut(field)
                .and_then(|search| search.poll(now));
            if let Some(event) = event {
                self.apply_search_event(field, event);
            }
        }
        if self.is_busy() {
            self.throbber_state.calc_next();
        }
    }

    fn route_to(&mut self, field: Field, key: KeyEvent, now: Instant) {
        let event = self
            .search_mut(field)
            .and_then(|search| search.handle_key(key, now));
        if let Some(event) = event {
            self.apply_search_event(field, event);
        }
    }

    fn apply_search_event(&mut self, field: Field, event: SearchEvent) {
        match (field, event) {
            (Field::Location, SearchEvent::Selected(place)) => {
                debug!(location = %place.display_label(), "location chosen");
                self.chosen_location = Some(place);
            }
            (Field::Location, SearchEvent::Cleared) => {
                self.chosen_location = None;
            }
            (Field::Targeting, SearchEvent::Selected(entity)) => {
                let label = entity.display_label();
                if !self.tags.add(entity) {
                    debug!(tag = %label, "tag already present");
                }
            }
            (Field::Targeting, SearchEvent::Cleared) => {}
            (_, SearchEvent::DetailFailed { option, message }) => {
                self.notice = Some(detail_notice(&option, &message));
            }
        }
    }

    fn handle_tag_key(&mut self, key: KeyEvent) {
        let Some(last) = self.tags.len().checked_sub(1) else {
            return;
        };
        let current = self.tag_cursor.unwrap_or(last).min(last);
        match key.code {
            KeyCode::Left => self.tag_cursor = Some(current.saturating_sub(1)),
            KeyCode::Right => self.tag_cursor = Some((current + 1).min(last)),
            KeyCode::Backspace | KeyCode::Delete => {
                let removed = self
                    .tags
                    .get(current)
                    .cloned()
                    .and_then(|tag| self.tags.remove(&tag));
                if let Some(removed) = removed {
                    debug!(tag = %removed.display_label(), "tag removed");
                }
                self.tag_cursor = match self.tags.len().checked_sub(1) {
                    Some(last) => Some(current.min(last)),
                    None => None,
                };
            }
            _ => {}
        }
    }

    fn cycle_focus(&mut self, step: isize) {
        let order = self.focus_order();
        let current = order
            .iter()
            .position(|focus| *focus == self.focus)
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(order.len() as isize) as usize;
        self.set_focus(order[next]);
    }

    fn focused_field_has_input(&self) -> bool {
        let field = match self.focus {
            Focus::Location => self.location.as_ref(),
            Focus::Targeting => self.targeting.as_ref(),
            Focus::Objective | Focus::Tags => None,
        };
        field.is_some_and(|field| !field.search.text().is_empty() || field.search.is_open())
    }

    fn search_mut(&mut self, field: Field) -> Option<&mut DebouncedSearch> {
        let slot = match field {
            Field::Location => self.location.as_mut(),
            Field::Targeting => self.targeting.as_mut(),
        };
        slot.map(|field| &mut field.search)
    }
}

fn detail_notice(option: &SelectOption, message: &str) -> Notice {
    Notice {
        title: "Location unavailable".to_string(),
        message: format!("Could not load {}: {message}", option.display_label()),
    }
}

#[cfg(test)]
mod tests;

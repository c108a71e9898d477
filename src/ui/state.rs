use serde::Serialize;
use throbber_widgets_tui::ThrobberState;

use crate::options::{MultiSelection, SelectOption};
use crate::tui::Theme;
use crate::widgets::{DebouncedSearch, SelectableList};

/// Which form row receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Objective,
    Location,
    Targeting,
    Tags,
}

/// What the form collected when it closed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormOutcome {
    /// `false` when the user cancelled.
    pub accepted: bool,
    pub objective: Option<SelectOption>,
    pub location: Option<SelectOption>,
    pub tags: Vec<SelectOption>,
}

/// A message that blocks input until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

pub(crate) struct SearchField {
    pub(crate) title: String,
    pub(crate) search: DebouncedSearch,
}

pub struct App {
    pub(crate) title: String,
    pub(crate) objective: SelectableList,
    pub(crate) location: Option<SearchField>,
    pub(crate) targeting: Option<SearchField>,
    pub(crate) chosen_location: Option<SelectOption>,
    pub(crate) tags: MultiSelection,
    pub(crate) tag_cursor: Option<usize>,
    pub(crate) focus: Focus,
    pub(crate) notice: Option<Notice>,
    pub theme: Theme,
    pub(crate) throbber_state: ThrobberState,
}

impl App {
    pub(crate) fn new(
        title: String,
        objective: SelectableList,
        location: Option<SearchField>,
        targeting: Option<SearchField>,
        theme: Theme,
    ) -> Self {
        let mut app = Self {
            title,
            objective,
            location,
            targeting,
            chosen_location: None,
            tags: MultiSelection::new(),
            tag_cursor: None,
            focus: Focus::Objective,
            notice: None,
            theme,
            throbber_state: ThrobberState::default(),
        };
        app.set_focus(Focus::Objective);
        app
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn objective(&self) -> &SelectableList {
        &self.objective
    }

    pub fn location(&self) -> Option<&SelectOption> {
        self.chosen_location.as_ref()
    }

    pub fn tags(&self) -> &MultiSelection {
        &self.tags
    }

    /// Tag picked for removal while the tag row has focus.
    pub fn tag_cursor(&self) -> Option<usize> {
        self.tag_cursor
    }

    pub fn location_search(&self) -> Option<&DebouncedSearch> {
        self.location.as_ref().map(|field| &field.search)
    }

    pub fn targeting_search(&self) -> Option<&DebouncedSearch> {
        self.targeting.as_ref().map(|field| &field.search)
    }

    /// Rows that can take focus, top to bottom.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Objective];
        if self.location.is_some() {
            order.push(Focus::Location);
        }
        if self.targeting.is_some() {
            order.push(Focus::Targeting);
            order.push(Focus::Tags);
        }
        order
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if !self.focus_order().contains(&focus) {
            return;
        }
        self.focus = focus;
        self.tag_cursor = match focus {
            Focus::Tags => self.tags.len().checked_sub(1),
            _ => None,
        };
        if focus != Focus::Objective {
            self.objective.dismiss();
        }
        if let Some(field) = self.location.as_mut() {
            field.search.set_focused(focus == Focus::Location);
        }
        if let Some(field) = self.targeting.as_mut() {
            field.search.set_focused(focus == Focus::Targeting);
        }
    }

    pub(crate) fn outcome(&self, accepted: bool) -> FormOutcome {
        FormOutcome {
            accepted,
            objective: self.objective.selection().cloned(),
            location: self.chosen_location.clone(),
            tags: self.tags.iter().cloned().collect(),
        }
    }

    pub(crate) fn is_busy(&self) -> bool {
        [self.location.as_ref(), self.targeting.as_ref()]
            .into_iter()
            .flatten()
            .any(|field| field.search.is_busy())
    }
}

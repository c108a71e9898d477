use std::fmt;
use std::sync::Arc;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;

use super::{LabelFn, default_label};
use crate::options::{Identity, SelectOption, matches_selection};

const EMPTY_PLACEHOLDER: &str = "No options";

/// Single pick list opened from a button into a modal.
///
/// The list never opens while disabled or empty. Picking a row records it as
/// the selection, closes the modal and hands the option back to the caller.
pub struct SelectableList {
    options: Vec<SelectOption>,
    selection: Option<SelectOption>,
    disabled: bool,
    open: bool,
    cursor: ListState,
    placeholder: String,
    button_label: LabelFn,
    row_label: LabelFn,
}

impl SelectableList {
    #[must_use]
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            selection: None,
            disabled: false,
            open: false,
            cursor: ListState::default(),
            placeholder: "Select an option".to_string(),
            button_label: default_label(),
            row_label: default_label(),
        }
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Option<SelectOption>) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_button_label(
        mut self,
        label: impl Fn(&SelectOption) -> String + Send + Sync + 'static,
    ) -> Self {
        self.button_label = Arc::new(label);
        self
    }

    #[must_use]
    pub fn with_row_label(
        mut self,
        label: impl Fn(&SelectOption) -> String + Send + Sync + 'static,
    ) -> Self {
        self.row_label = Arc::new(label);
        self
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selection(&self) -> Option<&SelectOption> {
        self.selection.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Disabling an open list closes it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.dismiss();
        }
    }

    /// Swap the option list. A selection whose identity is still present is
    /// refreshed from the new list; otherwise it is kept as-is.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        if let Some(current) = &self.selection {
            let identity = current.identity();
            let refreshed = match identity {
                Identity::Whole(_) => None,
                _ => self
                    .options
                    .iter()
                    .find(|option| option.identity() == identity)
                    .cloned(),
            };
            if let Some(refreshed) = refreshed {
                self.selection = Some(refreshed);
            }
        }
        if self.options.is_empty() {
            self.dismiss();
        } else if let Some(index) = self.cursor.selected() {
            self.cursor.select(Some(index.min(self.options.len() - 1)));
        }
    }

    pub fn can_open(&self) -> bool {
        !self.disabled && !self.options.is_empty()
    }

    /// Open the modal, highlighting the current selection.
    ///
    /// Returns whether the modal is open afterwards.
    pub fn open(&mut self) -> bool {
        if !self.can_open() {
            return false;
        }
        let index = self
            .selection
            .as_ref()
            .and_then(|current| {
                self.options
                    .iter()
                    .position(|option| matches_selection(option, current))
            })
            .unwrap_or(0);
        self.cursor.select(Some(index));
        self.open = true;
        true
    }

    /// Close the modal without changing the selection.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// Choose the option at `index`.
    pub fn pick(&mut self, index: usize) -> Option<SelectOption> {
        if self.disabled {
            return None;
        }
        let option = self.options.get(index)?.clone();
        self.selection = Some(option.clone());
        self.cursor.select(Some(index));
        self.open = false;
        Some(option)
    }

    pub fn pick_highlighted(&mut self) -> Option<SelectOption> {
        let index = self.cursor.selected()?;
        self.pick(index)
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.cursor.selected()
    }

    pub fn next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let last = self.options.len() - 1;
        let index = self.cursor.selected().map_or(0, |index| (index + 1).min(last));
        self.cursor.select(Some(index));
    }

    pub fn previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let index = self.cursor.selected().map_or(0, |index| index.saturating_sub(1));
        self.cursor.select(Some(index));
    }

    /// Whether `option` is the current selection.
    pub fn is_selected(&self, option: &SelectOption) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|current| matches_selection(option, current))
    }

    /// Text for the button that opens the modal.
    pub fn button_text(&self) -> String {
        if self.options.is_empty() {
            return EMPTY_PLACEHOLDER.to_string();
        }
        match &self.selection {
            Some(selection) => (self.button_label)(selection),
            None => self.placeholder.clone(),
        }
    }

    pub fn row_text(&self, option: &SelectOption) -> String {
        (self.row_label)(option)
    }

    /// Route a key press. Returns the option when the key picked one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SelectOption> {
        if !self.open {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down) {
                self.open();
            }
            return None;
        }

        match key.code {
            KeyCode::Esc => self.dismiss(),
            KeyCode::Enter | KeyCode::Char(' ') => return self.pick_highlighted(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Home => self.cursor.select(Some(0)),
            KeyCode::End => self.cursor.select(Some(self.options.len().saturating_sub(1))),
            _ => {}
        }
        None
    }

    pub(crate) fn cursor_mut(&mut self) -> &mut ListState {
        &mut self.cursor
    }
}

impl fmt::Debug for SelectableList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectableList")
            .field("options", &self.options)
            .field("selection", &self.selection)
            .field("disabled", &self.disabled)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

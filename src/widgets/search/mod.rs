//! Debounced remote search with a staleness guard.
//!
//! The widget turns keystrokes into at most one lookup per quiet period and
//! only ever shows the reply to the most recent lookup. Timers are deadlines
//! checked from [`DebouncedSearch::poll`], which the host calls once per frame.


use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::TryRecvError;
use std::time::{Duration, Instant};

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::ListState;
use tracing::{debug, error, warn};
use tui_textarea::{CursorMove, TextArea};

use super::{LabelFn, default_label};
use crate::options::SelectOption;
use crate::systems::search::{
    Debounce, LookupPayload, LookupReply, LookupRequest, LookupRuntime, SharedSource,
};

/// What clearing the field tells the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearBehavior {
    /// Clearing emits [`SearchEvent::Cleared`] so the host can drop its value.
    NotifyCaller,
    /// Clearing only resets the widget.
    ResetLocal,
}

/// Tuning for one search widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Shorter queries (in characters, ignoring surrounding whitespace) never
    /// reach the source.
    pub min_query_length: usize,
    pub debounce: Duration,
    pub clear: ClearBehavior,
    /// Resolve the chosen suggestion through [`SuggestionSource::details`]
    /// before reporting it.
    ///
    /// [`SuggestionSource::details`]: crate::systems::search::SuggestionSource::details
    pub detail_lookup: bool,
    /// Leave the chosen label in the text field after a selection.
    pub keep_selection_text: bool,
}

impl SearchSettings {
    pub const DEFAULT_MIN_QUERY_LENGTH: usize = 2;
    pub const PLACE_DEBOUNCE: Duration = Duration::from_millis(300);
    pub const ENTITY_DEBOUNCE: Duration = Duration::from_millis(500);

    /// Place autocomplete: coordinates are fetched for the chosen place and
    /// clearing the field clears the caller's location.
    #[must_use]
    pub const fn places() -> Self {
        Self {
            min_query_length: Self::DEFAULT_MIN_QUERY_LENGTH,
            debounce: Self::PLACE_DEBOUNCE,
            clear: ClearBehavior::NotifyCaller,
            detail_lookup: true,
            keep_selection_text: true,
        }
    }

    /// Targeting entity search used for tagging.
    #[must_use]
    pub const fn entities() -> Self {
        Self {
            min_query_length: Self::DEFAULT_MIN_QUERY_LENGTH,
            debounce: Self::ENTITY_DEBOUNCE,
            clear: ClearBehavior::ResetLocal,
            detail_lookup: false,
            keep_selection_text: false,
        }
    }

    #[must_use]
    pub const fn with_min_query_length(mut self, min_query_length: usize) -> Self {
        self.min_query_length = min_query_length;
        self
    }

    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::places()
    }
}

/// Lifecycle of a search widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing pending; the query is too short or was cleared.
    Idle,
    /// Waiting for the input to go quiet.
    Debouncing,
    /// A suggestion lookup is in flight.
    Loading,
    /// The latest lookup returned suggestions.
    Results,
    /// The latest lookup returned nothing.
    Empty,
    /// The latest lookup failed. The field stays usable.
    Failed,
    /// Fetching details for the chosen suggestion.
    Resolving,
}

/// Notifications for the hosting form.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// The user chose an option (enriched when detail lookup is enabled).
    Selected(SelectOption),
    /// The user cleared a field configured with [`ClearBehavior::NotifyCaller`].
    Cleared,
    /// The detail lookup for a chosen option failed. Hosts show this as a
    /// blocking notice.
    DetailFailed {
        option: SelectOption,
        message: String,
    },
}

/// Text input that drives a debounced remote lookup.
pub struct DebouncedSearch {
    settings: SearchSettings,
    input: TextArea<'static>,
    placeholder: String,
    timer: Debounce,
    runtime: LookupRuntime,
    phase: SearchPhase,
    results: Vec<SelectOption>,
    cursor: ListState,
    open: bool,
    last_error: Option<String>,
    dropped: usize,
    focused: bool,
    row_label: LabelFn,
}

impl DebouncedSearch {
    pub fn new(source: SharedSource, settings: SearchSettings) -> Self {
        let mut search = Self {
            settings,
            input: TextArea::default(),
            placeholder: String::new(),
            timer: Debounce::new(),
            runtime: LookupRuntime::new(source),
            phase: SearchPhase::Idle,
            results: Vec::new(),
            cursor: ListState::default(),
            open: false,
            last_error: None,
            dropped: 0,
            focused: false,
            row_label: default_label(),
        };
        search.input = search.fresh_input("");
        search
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self.input = self.fresh_input(&self.text().to_string());
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

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn results(&self) -> &[SelectOption] {
        &self.results
    }

    pub fn text(&self) -> &str {
        self.input.lines().first().map_or("", String::as_str)
    }

    /// Whether the suggestion list is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// A lookup is in flight, suggestions or details.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, SearchPhase::Loading | SearchPhase::Resolving)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of lookups handed to the source so far.
    pub fn issued_lookups(&self) -> usize {
        self.runtime.issued()
    }

    /// Number of replies discarded because a newer lookup superseded them.
    pub fn dropped_replies(&self) -> usize {
        self.dropped
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.cursor.selected()
    }

    pub fn row_text(&self, option: &SelectOption) -> String {
        (self.row_label)(option)
    }

    /// Replace the query text as if the user had typed it.
    pub fn set_text(&mut self, text: &str, now: Instant) {
        self.input = self.fresh_input(text);
        self.on_text_changed(now);
    }

    /// Route a key press.
    ///
    /// Enter selects the highlighted suggestion, Esc clears, Up/Down move the
    /// highlight. Everything else edits the text.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<SearchEvent> {
        match key.code {
            KeyCode::Enter => {
                if self.open && self.phase == SearchPhase::Results {
                    let index = self.cursor.selected().unwrap_or(0);
                    return self.select(index);
                }
                None
            }
            KeyCode::Esc => self.clear(),
            KeyCode::Up => {
                self.move_highlight(-1);
                None
            }
            KeyCode::Down => {
                self.move_highlight(1);
                None
            }
            _ => {
                if self.input.input(key) {
                    self.on_text_changed(now);
                }
                None
            }
        }
    }

    /// Fire the debounce timer when due and apply any replies that arrived.
    pub fn poll(&mut self, now: Instant) -> Option<SearchEvent> {
        if let Some(query) = self.timer.take_due(now) {
            self.phase = SearchPhase::Loading;
            self.runtime.issue(LookupRequest::Suggest(query));
        }
        self.pump_replies()
    }

    /// Choose the suggestion at `index`.
    ///
    /// Without detail lookup the option is returned right away. With it the
    /// details are fetched and the result arrives later through [`Self::poll`].
    pub fn select(&mut self, index: usize) -> Option<SearchEvent> {
        let option = self.results.get(index)?.clone();
        self.timer.cancel();
        self.runtime.supersede();
        self.open = false;
        self.results.clear();
        self.cursor.select(None);
        self.last_error = None;

        let text = if self.settings.keep_selection_text {
            (self.row_label)(&option)
        } else {
            String::new()
        };
        self.input = self.fresh_input(&text);

        if self.settings.detail_lookup {
            self.phase = SearchPhase::Resolving;
            self.runtime.issue(LookupRequest::Details(option));
            None
        } else {
            self.phase = SearchPhase::Idle;
            Some(SearchEvent::Selected(option))
        }
    }

    /// Empty the field and forget pending work.
    pub fn clear(&mut self) -> Option<SearchEvent> {
        self.reset();
        self.input = self.fresh_input("");
        match self.settings.clear {
            ClearBehavior::NotifyCaller => Some(SearchEvent::Cleared),
            ClearBehavior::ResetLocal => None,
        }
    }

    /// Stop any pending timer and ignore replies still in flight.
    pub fn dispose(&mut self) {
        self.timer.cancel();
        self.runtime.supersede();
        self.open = false;
    }

    /// Show or hide the text cursor.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.input.set_cursor_style(cursor_style(focused));
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub(crate) fn input(&self) -> &TextArea<'static> {
        &self.input
    }

    pub(crate) fn cursor_mut(&mut self) -> &mut ListState {
        &mut self.cursor
    }

    fn fresh_input(&self, text: &str) -> TextArea<'static> {
        let mut input = TextArea::new(vec![text.to_string()]);
        input.set_cursor_line_style(Style::default());
        input.set_cursor_style(cursor_style(self.focused));
        input.set_placeholder_text(self.placeholder.clone());
        input.move_cursor(CursorMove::End);
        input
    }

    /// Suggestions for the previous text are hidden right away; the last
    /// error survives until the next reply or a short query.
    fn on_text_changed(&mut self, now: Instant) {
        self.timer.cancel();
        self.runtime.supersede();
        self.results.clear();
        self.cursor.select(None);
        self.open = false;

        let query = self.text().trim().to_string();
        if query.chars().count() < self.settings.min_query_length {
            self.reset();
            return;
        }

        self.timer.schedule(query, now, self.settings.debounce);
        self.phase = SearchPhase::Debouncing;
    }

    fn reset(&mut self) {
        self.timer.cancel();
        self.runtime.supersede();
        self.results.clear();
        self.cursor.select(None);
        self.open = false;
        self.last_error = None;
        self.phase = SearchPhase::Idle;
    }

    fn move_highlight(&mut self, delta: isize) {
        if !self.open || self.phase != SearchPhase::Results {
            return;
        }
        let last = self.results.len() - 1;
        let current = self.cursor.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(last);
        self.cursor.select(Some(next));
    }

    fn pump_replies(&mut self) -> Option<SearchEvent> {
        let mut event = None;
        loop {
            match self.runtime.try_recv() {
                Ok(reply) => {
                    if let Some(applied) = self.apply_reply(reply) {
                        event = Some(applied);
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        event
    }

    fn apply_reply(&mut self, reply: LookupReply) -> Option<SearchEvent> {
        if !self.runtime.matches_latest(reply.id) {
            self.dropped += 1;
            debug!(id = reply.id, "dropping stale lookup reply");
            return None;
        }
        self.runtime.record_completion();

        match reply.payload {
            LookupPayload::Suggestions(Ok(results)) => {
                self.phase = if results.is_empty() {
                    SearchPhase::Empty
                } else {
                    SearchPhase::Results
                };
                self.cursor.select(if results.is_empty() { None } else { Some(0) });
                self.results = results;
                self.last_error = None;
                self.open = true;
                None
            }
            LookupPayload::Suggestions(Err(err)) => {
                warn!(error = %err, "suggestion lookup failed");
                self.results.clear();
                self.cursor.select(None);
                self.last_error = Some(err.to_string());
                self.phase = SearchPhase::Failed;
                self.open = true;
                None
            }
            LookupPayload::Details { result: Ok(enriched), .. } => {
                self.phase = SearchPhase::Idle;
                Some(SearchEvent::Selected(enriched))
            }
            LookupPayload::Details {
                option,
                result: Err(err),
            } => {
                error!(error = %err, "detail lookup failed");
                self.phase = SearchPhase::Idle;
                Some(SearchEvent::DetailFailed {
                    option,
                    message: err.to_string(),
                })
            }
        }
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for DebouncedSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebouncedSearch")
            .field("settings", &self.settings)
            .field("text", &self.text())
            .field("phase", &self.phase)
            .field("results", &self.results.len())
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

fn cursor_style(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    }
}

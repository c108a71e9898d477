use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::tui::theme::Theme;
use crate::widgets::{DebouncedSearch, SearchPhase};

const EMPTY_MESSAGE: &str = "No results";
const FAILED_MESSAGE: &str = "Suggestions unavailable";
const MAX_VISIBLE_SUGGESTIONS: u16 = 8;

/// Argument bundle for rendering a search field.
pub struct SearchView<'a> {
    pub title: &'a str,
    pub focused: bool,
    pub theme: &'a Theme,
    pub throbber_state: &'a ThrobberState,
}

/// Render the bordered input line, with a spinner in the border while a
/// lookup is in flight.
pub fn render_search_input(
    frame: &mut Frame,
    area: Rect,
    search: &DebouncedSearch,
    view: SearchView<'_>,
) {
    let SearchView {
        title,
        focused,
        theme,
        throbber_state,
    } = view;

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(Span::styled(format!(" {title} "), theme.prompt_style()));

    if search.is_busy() {
        let muted = theme.empty_style();
        let spinner = Throbber::default()
            .style(muted)
            .throbber_style(muted);
        let mut line = Line::from(spinner.to_symbol_span(throbber_state));
        line.spans.push(Span::styled(status_label(search.phase()), muted));
        line.spans.push(Span::raw(" "));
        block = block.title_top(line.right_aligned());
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(search.input(), inner);
}

/// Render the open suggestion list directly below `anchor`, kept inside
/// `bounds`. Does nothing while the list is closed.
pub fn render_suggestions(
    frame: &mut Frame,
    anchor: Rect,
    bounds: Rect,
    search: &mut DebouncedSearch,
    theme: &Theme,
) {
    let rows = match search.phase() {
        _ if !search.is_open() => return,
        SearchPhase::Results => (search.results().len() as u16).min(MAX_VISIBLE_SUGGESTIONS),
        SearchPhase::Empty | SearchPhase::Failed => 1,
        SearchPhase::Idle
        | SearchPhase::Debouncing
        | SearchPhase::Loading
        | SearchPhase::Resolving => return,
    };
    let top = anchor.bottom().min(bounds.bottom());
    let area = Rect {
        x: anchor.x,
        y: top,
        width: anchor.width,
        height: (rows + 2).min(bounds.bottom().saturating_sub(top)),
    };
    if area.height < 3 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.empty_style());
    frame.render_widget(Clear, area);

    match search.phase() {
        SearchPhase::Results => {
            let items: Vec<ListItem> = search
                .results()
                .iter()
                .map(|option| ListItem::new(search.row_text(option)))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_symbol("▶ ")
                .highlight_style(theme.row_highlight_style());
            frame.render_stateful_widget(list, area, search.cursor_mut());
        }
        SearchPhase::Failed => {
            let message = Paragraph::new(FAILED_MESSAGE)
                .alignment(Alignment::Center)
                .style(theme.empty_style())
                .block(block);
            frame.render_widget(message, area);
        }
        _ => {
            let message = Paragraph::new(EMPTY_MESSAGE)
                .alignment(Alignment::Center)
                .style(theme.empty_style())
                .block(block);
            frame.render_widget(message, area);
        }
    }
}

fn status_label(phase: SearchPhase) -> &'static str {
    match phase {
        SearchPhase::Resolving => " resolving",
        _ => " searching",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::client::SearchError;
    use crate::options::{OptionRecord, SelectOption, format_audience_row};
    use crate::systems::search::SharedSource;
    use crate::tui::components::buffer_text;
    use crate::widgets::SearchSettings;

    fn draw(search: &mut DebouncedSearch) -> String {
        let mut terminal = Terminal::new(TestBackend::new(48, 10)).expect("terminal");
        let throbber = ThrobberState::default();
        terminal
            .draw(|frame| {
                let bounds = frame.area();
                let anchor = Rect::new(0, 0, bounds.width, 3);
                let view = SearchView {
                    title: "Interests",
                    focused: true,
                    theme: &Theme::default(),
                    throbber_state: &throbber,
                };
                render_search_input(frame, anchor, search, view);
                render_suggestions(frame, anchor, bounds, search, &Theme::default());
            })
            .expect("draw");
        buffer_text(terminal.backend().buffer())
    }

    fn fans(query: &str) -> Result<Vec<SelectOption>, SearchError> {
        Ok(vec![
            OptionRecord::new()
                .with_id(query)
                .with_field("name", format!("{query} fans"))
                .into(),
        ])
    }

    fn settled(source: SharedSource, text: &str) -> DebouncedSearch {
        let mut search = DebouncedSearch::new(source, SearchSettings::entities())
            .with_row_label(format_audience_row);
        let start = Instant::now();
        search.set_text(text, start);
        let due = start + SearchSettings::ENTITY_DEBOUNCE;
        let deadline = Instant::now() + Duration::from_secs(2);
        search.poll(due);
        while search.is_busy() {
            assert!(Instant::now() < deadline, "lookup never finished");
            thread::sleep(Duration::from_millis(5));
            search.poll(due);
        }
        search
    }

    #[test]
    fn results_render_with_audience_reach() {
        let source: SharedSource = Arc::new(|_: &str| -> Result<Vec<SelectOption>, SearchError> {
            Ok(vec![
                OptionRecord::new()
                    .with_id("6003")
                    .with_field("name", "Coffee")
                    .with_field("audience_size", 1_260_000)
                    .into(),
            ])
        });
        let mut search = settled(source, "coff");

        let view = draw(&mut search);

        assert!(view.contains("Interests"), "{view}");
        assert!(view.contains("coff"), "{view}");
        assert!(view.contains("▶ Coffee · 1.3M"), "{view}");
    }

    #[test]
    fn empty_and_failed_lookups_render_messages() {
        let empty: SharedSource =
            Arc::new(|_: &str| -> Result<Vec<SelectOption>, SearchError> { Ok(Vec::new()) });
        let mut search = settled(empty, "zzz");
        assert!(draw(&mut search).contains(EMPTY_MESSAGE));

        let failing: SharedSource = Arc::new(|_: &str| -> Result<Vec<SelectOption>, SearchError> {
            Err(SearchError::Transport("request timed out".into()))
        });
        let mut search = settled(failing, "zzz");
        let view = draw(&mut search);
        assert!(view.contains(FAILED_MESSAGE), "{view}");
        assert!(!view.contains("timed out"), "{view}");
    }

    #[test]
    fn retyping_over_open_results_draws_no_stale_list() {
        let source: SharedSource = Arc::new(fans);
        let mut search = settled(source, "porto");
        assert!(draw(&mut search).contains("porto fans"));

        search.set_text("port", Instant::now());
        let view = draw(&mut search);

        assert_eq!(search.phase(), SearchPhase::Debouncing);
        assert!(!view.contains("porto fans"), "{view}");
        assert!(!view.contains(EMPTY_MESSAGE), "{view}");
        assert!(!view.contains(FAILED_MESSAGE), "{view}");
    }

    #[test]
    fn busy_fields_show_a_spinner_label() {
        let source: SharedSource = Arc::new(|_: &str| -> Result<Vec<SelectOption>, SearchError> {
            thread::sleep(Duration::from_millis(200));
            Ok(Vec::new())
        });
        let mut search = DebouncedSearch::new(source, SearchSettings::entities());
        let start = Instant::now();
        search.set_text("nurse", start);
        search.poll(start + SearchSettings::ENTITY_DEBOUNCE);

        let view = draw(&mut search);

        assert!(view.contains("searching"), "{view}");
        assert!(!view.contains(EMPTY_MESSAGE), "{view}");
    }
}

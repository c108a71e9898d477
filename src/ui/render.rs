use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{App, Focus};
use crate::tui::components::{
    SearchView, render_notice, render_search_input, render_select_button, render_select_modal,
    render_suggestions, render_tags,
};

const FIELD_HEIGHT: u16 = 3;
const OBJECTIVE_TITLE: &str = "Objective";
const HELP: &str = "Tab next field · Enter choose · Esc clear/cancel · F2 submit";

impl App {
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area().inner(Margin {
            vertical: 0,
            horizontal: 1,
        });

        let mut constraints = vec![Constraint::Length(1), Constraint::Length(FIELD_HEIGHT)];
        if self.location.is_some() {
            constraints.push(Constraint::Length(FIELD_HEIGHT));
        }
        if self.targeting.is_some() {
            constraints.push(Constraint::Length(FIELD_HEIGHT));
            constraints.push(Constraint::Length(FIELD_HEIGHT));
        }
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(area);

        let header = Paragraph::new(Line::from(Span::styled(
            format!(" {} ", self.title),
            self.theme.header_style(),
        )));
        frame.render_widget(header, rows[0]);

        render_select_button(
            frame,
            rows[1],
            &self.objective,
            OBJECTIVE_TITLE,
            self.focus == Focus::Objective,
            &self.theme,
        );

        let mut next_row = 2;
        let mut location_area = None;
        if let Some(field) = &self.location {
            let row = rows[next_row];
            next_row += 1;
            let title = match &self.chosen_location {
                Some(_) => format!("{} ✓", field.title),
                None => field.title.clone(),
            };
            let view = SearchView {
                title: &title,
                focused: self.focus == Focus::Location,
                theme: &self.theme,
                throbber_state: &self.throbber_state,
            };
            render_search_input(frame, row, &field.search, view);
            location_area = Some(row);
        }

        let mut targeting_area = None;
        if let Some(field) = &self.targeting {
            let row = rows[next_row];
            let view = SearchView {
                title: &field.title,
                focused: self.focus == Focus::Targeting,
                theme: &self.theme,
                throbber_state: &self.throbber_state,
            };
            render_search_input(frame, row, &field.search, view);
            render_tags(
                frame,
                rows[next_row + 1],
                &self.tags,
                self.tag_cursor,
                self.focus == Focus::Tags,
                &self.theme,
            );
            targeting_area = Some(row);
        }

        let help = Paragraph::new(Span::styled(HELP, self.theme.empty_style()));
        frame.render_widget(help, rows[rows.len() - 1]);

        self.draw_overlays(frame, area, location_area, targeting_area);
    }

    fn draw_overlays(
        &mut self,
        frame: &mut Frame,
        bounds: Rect,
        location_area: Option<Rect>,
        targeting_area: Option<Rect>,
    ) {
        match (self.focus, &mut self.location, &mut self.targeting) {
            (Focus::Location, Some(field), _) => {
                if let Some(anchor) = location_area {
                    render_suggestions(frame, anchor, bounds, &mut field.search, &self.theme);
                }
            }
            (Focus::Targeting, _, Some(field)) => {
                if let Some(anchor) = targeting_area {
                    render_suggestions(frame, anchor, bounds, &mut field.search, &self.theme);
                }
            }
            _ => {}
        }

        render_select_modal(
            frame,
            bounds,
            &mut self.objective,
            OBJECTIVE_TITLE,
            &self.theme,
        );

        if let Some(notice) = &self.notice {
            render_notice(frame, bounds, &notice.title, &notice.message, &self.theme);
        }
    }
}

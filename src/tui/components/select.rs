use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::centered;
use crate::tui::theme::Theme;
use crate::widgets::SelectableList;

const HIGHLIGHT_SYMBOL: &str = "▶ ";
const SELECTED_MARKER: &str = "✓ ";
const UNSELECTED_MARKER: &str = "  ";

/// Render the button that opens a pick list.
pub fn render_select_button(
    frame: &mut Frame,
    area: Rect,
    list: &SelectableList,
    title: &str,
    focused: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(Span::styled(format!(" {title} "), theme.prompt_style()));

    let text_style = if list.is_disabled()
        || list.options().is_empty()
        || list.selection().is_none()
    {
        theme.empty_style()
    } else {
        theme.highlight_style()
    };
    let mut line = Line::from(Span::styled(list.button_text(), text_style));
    if list.can_open() {
        line.spans.push(Span::styled(" ▾", theme.empty_style()));
    }

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the open pick list as a modal centred in `area`.
///
/// Does nothing while the list is closed.
pub fn render_select_modal(
    frame: &mut Frame,
    area: Rect,
    list: &mut SelectableList,
    title: &str,
    theme: &Theme,
) {
    if !list.is_open() {
        return;
    }

    let items: Vec<ListItem> = list
        .options()
        .iter()
        .map(|option| {
            let marker = if list.is_selected(option) {
                SELECTED_MARKER
            } else {
                UNSELECTED_MARKER
            };
            ListItem::new(format!("{marker}{}", list.row_text(option)))
        })
        .collect();

    let widest = list
        .options()
        .iter()
        .map(|option| list.row_text(option).width())
        .max()
        .unwrap_or(0)
        .max(title.width() + 2);
    let width = (widest + HIGHLIGHT_SYMBOL.width() + SELECTED_MARKER.width() + 2) as u16;
    let height = items.len() as u16 + 2;
    let modal = centered(area, width.max(24), height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(true))
        .title(Span::styled(format!(" {title} "), theme.header_style()));
    let widget = List::new(items)
        .block(block)
        .highlight_symbol(HIGHLIGHT_SYMBOL)
        .highlight_style(theme.row_highlight_style());

    frame.render_widget(Clear, modal);
    frame.render_stateful_widget(widget, modal, list.cursor_mut());
}

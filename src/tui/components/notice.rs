use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use super::centered;
use crate::tui::theme::Theme;

const DISMISS_HINT: &str = "Enter or Esc to dismiss";

/// Render a blocking notice over the whole form.
pub fn render_notice(frame: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let width = (message.width().max(DISMISS_HINT.width()) + 4).min(60) as u16;
    let inner_width = width.saturating_sub(2).max(1) as usize;
    let message_rows = message.width().div_ceil(inner_width).max(1) as u16;
    let modal = centered(area, width, message_rows + 4);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.error_style())
        .title(Span::styled(format!(" {title} "), theme.error_style()));
    let body = vec![
        Line::from(message.to_string()),
        Line::default(),
        Line::from(Span::styled(DISMISS_HINT, theme.empty_style())),
    ];
    let widget = Paragraph::new(body)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, modal);
    frame.render_widget(widget, modal);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::tui::components::buffer_text;

    #[test]
    fn notices_show_the_message_and_hint() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).expect("terminal");
        terminal
            .draw(|frame| {
                render_notice(
                    frame,
                    frame.area(),
                    "Location unavailable",
                    "place not found",
                    &Theme::default(),
                );
            })
            .expect("draw");

        let view = buffer_text(terminal.backend().buffer());
        assert!(view.contains("Location unavailable"), "{view}");
        assert!(view.contains("place not found"), "{view}");
        assert!(view.contains(DISMISS_HINT), "{view}");
    }
}

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::options::{MultiSelection, entity_name};
use crate::tui::theme::Theme;

/// Render the accumulated targeting tags as a wrapped row of chips.
pub fn render_tags(
    frame: &mut Frame,
    area: Rect,
    tags: &MultiSelection,
    cursor: Option<usize>,
    focused: bool,
    theme: &Theme,
) {
    let title = format!(" Targeting ({}) ", tags.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(Span::styled(title, theme.prompt_style()));

    let line = if tags.is_empty() {
        Line::from(Span::styled("No tags yet", theme.empty_style()))
    } else {
        let mut spans = Vec::with_capacity(tags.len() * 2);
        for (index, tag) in tags.iter().enumerate() {
            let style = if focused && cursor == Some(index) {
                theme.row_highlight_style()
            } else {
                theme.highlight_style()
            };
            spans.push(Span::styled(format!("[{}]", entity_name(tag)), style));
            spans.push(Span::raw(" "));
        }
        if focused {
            spans.push(Span::styled("←/→ pick · ⌫ removes", theme.empty_style()));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).block(block).wrap(Wrap { trim: true }), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    use super::*;
    use crate::options::OptionRecord;
    use crate::tui::components::buffer_text;

    fn draw(tags: &MultiSelection, cursor: Option<usize>, focused: bool) -> (String, Buffer) {
        let mut terminal = Terminal::new(TestBackend::new(50, 4)).expect("terminal");
        terminal
            .draw(|frame| {
                render_tags(frame, frame.area(), tags, cursor, focused, &Theme::default());
            })
            .expect("draw");
        let buffer = terminal.backend().buffer().clone();
        (buffer_text(&buffer), buffer)
    }

    fn coffee_and_nurse() -> MultiSelection {
        let mut tags = MultiSelection::new();
        tags.add(OptionRecord::new().with_id("1").with_field("name", "Coffee").into());
        tags.add(OptionRecord::new().with_id("2").with_field("name", "Nurse").into());
        tags
    }

    #[test]
    fn tags_render_by_name() {
        let (view, _) = draw(&coffee_and_nurse(), None, false);

        assert!(view.contains("Targeting (2)"), "{view}");
        assert!(view.contains("[Coffee] [Nurse]"), "{view}");
    }

    #[test]
    fn focused_cursor_highlights_one_chip() {
        let theme = Theme::default();
        let (view, buffer) = draw(&coffee_and_nurse(), Some(0), true);

        assert!(view.contains("⌫ removes"), "{view}");
        let picked = theme.row_highlight_style().bg.unwrap_or_default();
        // "[Coffee]" starts inside the border, "[Nurse]" nine columns later.
        assert_eq!(buffer[(1, 1)].bg, picked);
        assert_ne!(buffer[(10, 1)].bg, picked);
    }

    #[test]
    fn empty_tags_render_a_hint() {
        let (view, _) = draw(&MultiSelection::new(), None, false);
        assert!(view.contains("No tags yet"));
    }
}

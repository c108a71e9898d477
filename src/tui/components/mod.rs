//! Stateless renderers for the interactive widgets.

mod notice;
mod search;
mod select;
mod tags;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

pub use notice::render_notice;
pub use search::{SearchView, render_search_input, render_suggestions};
pub use select::{render_select_button, render_select_modal};
pub use tags::render_tags;

/// A `width` x `height` rectangle centred in `area`, clamped to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                text.push_str(cell.symbol());
            }
        }
        text.push('\n');
    }
    text
}

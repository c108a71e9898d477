use ratatui::style::{Color, Modifier, Style};

/// Palette shared by every form component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub header: Style,
    pub row_highlight: Style,
    pub prompt: Style,
    pub empty: Style,
    pub highlight: Style,
    pub focus: Style,
    pub error: Style,
}

pub const SLATE: Theme = Theme {
    header: Style::new()
        .fg(Color::Rgb(226, 232, 240))
        .bg(Color::Rgb(30, 41, 59)),
    row_highlight: Style::new()
        .bg(Color::Rgb(51, 65, 85))
        .fg(Color::Rgb(250, 204, 21)),
    prompt: Style::new().fg(Color::Rgb(56, 189, 248)),
    empty: Style::new().fg(Color::Rgb(148, 163, 184)),
    highlight: Style::new()
        .fg(Color::Rgb(250, 204, 21))
        .add_modifier(Modifier::BOLD),
    focus: Style::new().fg(Color::Rgb(56, 189, 248)),
    error: Style::new().fg(Color::Rgb(248, 113, 113)),
};

pub const LIGHT: Theme = Theme {
    header: Style::new()
        .fg(Color::Rgb(15, 23, 42))
        .bg(Color::Rgb(226, 232, 240)),
    row_highlight: Style::new()
        .bg(Color::Rgb(200, 200, 200))
        .fg(Color::Rgb(120, 120, 0)),
    prompt: Style::new().fg(Color::Rgb(0, 102, 153)),
    empty: Style::new().fg(Color::Rgb(100, 100, 100)),
    highlight: Style::new()
        .fg(Color::Rgb(120, 120, 0))
        .add_modifier(Modifier::BOLD),
    focus: Style::new().fg(Color::Rgb(0, 102, 153)),
    error: Style::new().fg(Color::Rgb(185, 28, 28)),
};

const BUILT_IN: &[(&str, Theme)] = &[("slate", SLATE), ("light", LIGHT)];

/// Look up a built-in palette by name, ignoring case.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
    BUILT_IN
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name.trim()))
        .map(|(_, theme)| *theme)
}

#[must_use]
pub fn names() -> Vec<&'static str> {
    BUILT_IN.iter().map(|(name, _)| *name).collect()
}

impl Theme {
    #[must_use]
    pub fn header_style(&self) -> Style {
        self.header
    }

    #[must_use]
    pub fn row_highlight_style(&self) -> Style {
        self.row_highlight
    }

    #[must_use]
    pub fn prompt_style(&self) -> Style {
        self.prompt
    }

    #[must_use]
    pub fn empty_style(&self) -> Style {
        self.empty
    }

    #[must_use]
    pub fn highlight_style(&self) -> Style {
        self.highlight
    }

    /// Border style for a field, brighter while it has focus.
    #[must_use]
    pub fn border_style(&self, focused: bool) -> Style {
        if focused { self.focus } else { self.empty }
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        self.error
    }
}

impl Default for Theme {
    fn default() -> Self {
        SLATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(by_name("Light"), Some(LIGHT));
        assert_eq!(by_name(" slate "), Some(SLATE));
        assert_eq!(by_name("solarized"), None);
        assert_eq!(names(), vec!["slate", "light"]);
    }
}

use anyhow::Result;

use super::App;
use super::state::{FormOutcome, SearchField};
use crate::options::{SelectOption, format_audience_row};
use crate::systems::search::SharedSource;
use crate::tui::Theme;
use crate::widgets::{DebouncedSearch, SearchSettings, SelectableList};

struct FieldSetup {
    title: String,
    source: SharedSource,
    settings: SearchSettings,
}

/// Builder for the campaign-targeting form.
pub struct FormUi {
    title: String,
    objectives: Vec<SelectOption>,
    initial_objective: Option<SelectOption>,
    location: Option<FieldSetup>,
    targeting: Option<FieldSetup>,
    theme: Option<Theme>,
}

impl FormUi {
    /// Start a form offering `objectives` in its pick list.
    pub fn new(objectives: Vec<SelectOption>) -> Self {
        Self {
            title: "New campaign".to_string(),
            objectives,
            initial_objective: None,
            location: None,
            targeting: None,
            theme: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_initial_objective(mut self, objective: Option<SelectOption>) -> Self {
        self.initial_objective = objective;
        self
    }

    /// Add a place search. Without one the location row is hidden.
    pub fn with_location(mut self, source: SharedSource, settings: SearchSettings) -> Self {
        self.location = Some(FieldSetup {
            title: "Location".to_string(),
            source,
            settings,
        });
        self
    }

    /// Add the entity search feeding the tag list.
    pub fn with_targeting(
        mut self,
        title: impl Into<String>,
        source: SharedSource,
        settings: SearchSettings,
    ) -> Self {
        self.targeting = Some(FieldSetup {
            title: title.into(),
            source,
            settings,
        });
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_theme_name(mut self, name: &str) -> Self {
        if let Some(theme) = crate::tui::theme::by_name(name) {
            self.theme = Some(theme);
        }
        self
    }

    /// Assemble the form state without touching the terminal.
    pub fn into_app(self) -> App {
        let objective = SelectableList::new(self.objectives)
            .with_selection(self.initial_objective)
            .with_placeholder("Choose an objective");

        let location = self.location.map(|setup| SearchField {
            search: DebouncedSearch::new(setup.source, setup.settings)
                .with_placeholder("Type a city or address"),
            title: setup.title,
        });
        let targeting = self.targeting.map(|setup| SearchField {
            search: DebouncedSearch::new(setup.source, setup.settings)
                .with_placeholder("Start typing to search")
                .with_row_label(format_audience_row),
            title: setup.title,
        });

        App::new(
            self.title,
            objective,
            location,
            targeting,
            self.theme.unwrap_or_default(),
        )
    }

    /// Run the form to completion on the current terminal.
    pub fn run(self) -> Result<FormOutcome> {
        let mut app = self.into_app();
        app.run()
    }
}

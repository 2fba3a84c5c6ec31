use crate::controller::{Controller, Effect, Intent};
use crate::models::{MovieSummary, TrendingCatalog};
use crate::view::{TrendingState, ViewState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Browse,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusedPanel {
    SearchBar,
    Results,
}

/// Input-surface state around the controller: what is typed, what is
/// highlighted, and the intents waiting to be dispatched.
pub struct App {
    pub controller: Controller,
    pub search_input: String,
    pub number_input: String,
    /// Highlighted movie: within the page in search, within the shelf at home.
    pub selected_index: usize,
    pub shelf_index: usize,
    pub input_mode: InputMode,
    pub focused_panel: FocusedPanel,
    pub pending: Vec<Intent>,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            search_input: String::new(),
            number_input: String::new(),
            selected_index: 0,
            shelf_index: 0,
            input_mode: InputMode::Browse,
            focused_panel: FocusedPanel::Results,
            pending: Vec::new(),
            should_quit: false,
        }
    }

    pub fn push(&mut self, intent: Intent) {
        self.pending.push(intent);
    }

    pub fn take_intents(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.pending)
    }

    /// Applies effects that only concern the input surface. Returns false for
    /// anything the executor has to handle.
    pub fn apply_ui_effect(&mut self, effect: &Effect) -> bool {
        match effect {
            Effect::ScrollToTop => {
                self.selected_index = 0;
                self.shelf_index = 0;
                true
            }
            Effect::ClearQueryInput => {
                self.search_input.clear();
                true
            }
            _ => false,
        }
    }

    pub fn catalog(&self) -> Option<&TrendingCatalog> {
        match self.controller.view() {
            ViewState::Home {
                trending: TrendingState::Loaded(catalog),
            } => Some(catalog),
            _ => None,
        }
    }

    pub fn shelf_genre(&self) -> Option<&str> {
        self.catalog()
            .and_then(|c| c.shelf(self.shelf_index))
            .map(|s| s.genre.as_str())
    }

    /// Movies the up/down or left/right keys move through.
    pub fn visible_movies(&self) -> &[MovieSummary] {
        match self.controller.view() {
            ViewState::Search { .. } => self.controller.view().page_items(),
            ViewState::Home { .. } => self
                .catalog()
                .and_then(|c| c.shelf(self.shelf_index))
                .map(|s| s.movies.as_slice())
                .unwrap_or(&[]),
        }
    }

    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        self.visible_movies().get(self.selected_index)
    }

    /// Keeps the highlight on something that exists after results change.
    pub fn clamp_selection(&mut self) {
        let shelves = self.catalog().map(|c| c.shelves.len()).unwrap_or(0);
        self.shelf_index = self.shelf_index.min(shelves.saturating_sub(1));
        let movies = self.visible_movies().len();
        self.selected_index = self.selected_index.min(movies.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_new_app_starts_browsing_home() {
        let app = App::new(Controller::new(&Config::default()));
        assert_eq!(app.input_mode, InputMode::Browse);
        assert_eq!(app.focused_panel, FocusedPanel::Results);
        assert!(app.controller.view().is_home());
        assert!(app.selected_movie().is_none());
    }

    #[test]
    fn test_ui_effects() {
        let mut app = App::new(Controller::new(&Config::default()));
        app.search_input = "leftover".to_string();
        app.selected_index = 4;
        app.shelf_index = 2;

        assert!(app.apply_ui_effect(&Effect::ClearQueryInput));
        assert!(app.search_input.is_empty());
        assert!(app.apply_ui_effect(&Effect::ScrollToTop));
        assert_eq!((app.selected_index, app.shelf_index), (0, 0));
        assert!(!app.apply_ui_effect(&Effect::OpenUrl("https://x.y".to_string())));
    }

    #[test]
    fn test_take_intents_drains() {
        let mut app = App::new(Controller::new(&Config::default()));
        app.push(Intent::ReturnHome);
        app.push(Intent::ClearError);

        assert_eq!(app.take_intents(), vec![Intent::ReturnHome, Intent::ClearError]);
        assert!(app.take_intents().is_empty());
    }

    #[test]
    fn test_clamp_selection_without_results() {
        let mut app = App::new(Controller::new(&Config::default()));
        app.selected_index = 9;
        app.shelf_index = 3;
        app.clamp_selection();
        assert_eq!((app.selected_index, app.shelf_index), (0, 0));
    }
}

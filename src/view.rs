use std::sync::Arc;

use thiserror::Error;

use crate::generation::Generation;
use crate::models::{MovieSummary, TrendingCatalog};
use crate::pagination;
use crate::session::{SearchSession, SessionSource};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a search query")]
    EmptyQuery,
}

/// Trims the query, rejecting blank input before anything hits the network.
pub fn validate_query(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyQuery)
    } else {
        Ok(trimmed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrendingState {
    Pending,
    Loaded(Arc<TrendingCatalog>),
    Failed(String),
}

/// Top-level mode. Exactly one of home or search is active.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Home { trending: TrendingState },
    Search { session: SearchSession, page: usize },
}

impl ViewState {
    pub fn home(trending: TrendingState) -> Self {
        ViewState::Home { trending }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, ViewState::Home { .. })
    }

    /// Replaces whatever was showing with a fresh session on page 1.
    pub fn enter_search(&mut self, source: SessionSource, generation: Generation) {
        *self = ViewState::Search {
            session: SearchSession::loading(source, generation),
            page: 1,
        };
    }

    /// Drops the current session entirely.
    pub fn return_home(&mut self, trending: TrendingState) {
        *self = ViewState::Home { trending };
    }

    /// Moves to `requested`, clamped to the available pages. Returns the page
    /// landed on, or `None` outside the search view.
    pub fn go_to_page(&mut self, requested: usize) -> Option<usize> {
        match self {
            ViewState::Search { session, page } => {
                *page = pagination::clamp_page(requested, session.total_pages());
                Some(*page)
            }
            ViewState::Home { .. } => None,
        }
    }

    pub fn page(&self) -> usize {
        match self {
            ViewState::Search { page, .. } => *page,
            ViewState::Home { .. } => 1,
        }
    }

    pub fn session(&self) -> Option<&SearchSession> {
        match self {
            ViewState::Search { session, .. } => Some(session),
            ViewState::Home { .. } => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut SearchSession> {
        match self {
            ViewState::Search { session, .. } => Some(session),
            ViewState::Home { .. } => None,
        }
    }

    pub fn trending_mut(&mut self) -> Option<&mut TrendingState> {
        match self {
            ViewState::Home { trending } => Some(trending),
            ViewState::Search { .. } => None,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.session().map(SearchSession::total_pages).unwrap_or(0)
    }

    /// Movies on the current page; empty until results arrive.
    pub fn page_items(&self) -> &[MovieSummary] {
        match self {
            ViewState::Search { session, page } => session
                .results()
                .map(|set| pagination::page_items(&set.results, *page))
                .unwrap_or(&[]),
            ViewState::Home { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::Tracker;
    use crate::models::{MovieId, Rating, SearchResultSet};

    fn movies(count: usize) -> Vec<MovieSummary> {
        (0..count)
            .map(|i| MovieSummary {
                id: MovieId::new(i.to_string()),
                title: format!("Movie {}", i + 1),
                year: "2024".to_string(),
                genre: "Drama".to_string(),
                rating: Rating::Score(7.0),
                plot: String::new(),
                poster: None,
                score: Some(0.5),
            })
            .collect()
    }

    fn search_with(count: usize) -> ViewState {
        let mut tracker = Tracker::new();
        let mut view = ViewState::home(TrendingState::Pending);
        view.enter_search(SessionSource::Query("q".to_string()), tracker.begin());
        view.session_mut().unwrap().succeed(SearchResultSet {
            query: "q".to_string(),
            results: movies(count),
            search_type: None,
            search_time: None,
        });
        view
    }

    #[test]
    fn test_validate_query() {
        assert_eq!(validate_query("   "), Err(ValidationError::EmptyQuery));
        assert_eq!(validate_query(""), Err(ValidationError::EmptyQuery));
        assert_eq!(validate_query("  noir "), Ok("noir"));
        assert_eq!(ValidationError::EmptyQuery.to_string(), "Please enter a search query");
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut view = search_with(30);
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.go_to_page(7), Some(3));
        assert_eq!(view.page_items().len(), 6);
        assert_eq!(view.go_to_page(0), Some(1));
        assert_eq!(view.page_items()[0].title, "Movie 1");
    }

    #[test]
    fn test_go_to_page_ignored_at_home() {
        let mut view = ViewState::home(TrendingState::Pending);
        assert_eq!(view.go_to_page(2), None);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_enter_search_resets_page() {
        let mut view = search_with(40);
        view.go_to_page(3);

        let mut tracker = Tracker::new();
        view.enter_search(SessionSource::Genre("action".to_string()), tracker.begin());
        assert_eq!(view.page(), 1);
        assert!(view.session().unwrap().is_loading());
        assert!(view.page_items().is_empty());
    }

    #[test]
    fn test_return_home_discards_session() {
        let mut view = search_with(40);
        view.go_to_page(2);
        view.return_home(TrendingState::Failed("offline".to_string()));
        assert!(view.is_home());
        assert!(view.session().is_none());
        assert_eq!(view.page(), 1);
    }
}

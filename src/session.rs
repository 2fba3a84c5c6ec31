use crate::generation::Generation;
use crate::models::SearchResultSet;
use crate::pagination;

/// Status of a session. There is no idle state: the home view simply has no
/// session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Loading,
    Success(SearchResultSet),
    Error(String),
}

/// Where a session's results come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionSource {
    Query(String),
    Genre(String),
}

/// One query or recommendation request and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    pub source: SessionSource,
    pub generation: Generation,
    pub status: SessionStatus,
}

impl SearchSession {
    pub fn loading(source: SessionSource, generation: Generation) -> Self {
        Self {
            source,
            generation,
            status: SessionStatus::Loading,
        }
    }

    /// Header text: the collaborator's echo of the query once results are
    /// in, otherwise what was asked for.
    pub fn description(&self) -> String {
        match (&self.status, &self.source) {
            (SessionStatus::Success(set), _) if !set.query.is_empty() => set.query.clone(),
            (_, SessionSource::Query(text)) => text.clone(),
            (_, SessionSource::Genre(genre)) => crate::models::recommendation_description(genre),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, SessionStatus::Loading)
    }

    pub fn results(&self) -> Option<&SearchResultSet> {
        match &self.status {
            SessionStatus::Success(set) => Some(set),
            _ => None,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.results()
            .map(|set| pagination::total_pages(set.results.len()))
            .unwrap_or(0)
    }

    pub fn succeed(&mut self, set: SearchResultSet) {
        self.status = SessionStatus::Success(set);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = SessionStatus::Error(message.into());
    }
}

use std::sync::Arc;

use log::{debug, info, warn};

use crate::api::ApiError;
use crate::config::Config;
use crate::detail::DetailDisclosure;
use crate::generation::{Generation, Tracker};
use crate::models::{MovieDetail, MovieId, SearchResultSet, TrendingCatalog};
use crate::session::SessionSource;
use crate::trailer::{self, TrailerOverlay};
use crate::view::{self, TrendingState, ViewState};

const TRENDING_FAILED: &str = "Failed to load trending movies";
const SEARCH_FAILED: &str = "Search failed";
const RECOMMENDATIONS_FAILED: &str = "Failed to load recommendations";
const DETAILS_FAILED: &str = "Failed to load movie details";
const TRAILER_FAILED: &str = "Failed to load trailer";
const NO_TRAILER: &str = "No trailer available for this movie";
const INTERRUPTED: &str = "Request was interrupted";

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SubmitQuery(String),
    SelectGenre(String),
    ReturnHome,
    GoToPage(usize),
    NextPage,
    PrevPage,
    OpenMovie(MovieId),
    ExpandDetail,
    CollapseDetail,
    CloseDetail,
    RequestTrailer(MovieId),
    DismissTrailer,
    OpenTrailer,
    /// 0-based index into the open detail's streaming offers.
    OpenOffer(usize),
    ClearError,
    ClearNotice,
}

/// Work the controller wants done outside of itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchTrending {
        generation: Generation,
    },
    FetchSearch {
        generation: Generation,
        query: String,
        top_k: usize,
    },
    FetchRecommendations {
        generation: Generation,
        genre: String,
    },
    FetchMovie {
        generation: Generation,
        id: MovieId,
    },
    FetchTrailer {
        generation: Generation,
        id: MovieId,
    },
    OpenUrl(String),
    ScrollToTop,
    ClearQueryInput,
}

/// Request slots, each with its own generation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Trending,
    Session,
    Detail,
    Trailer,
}

/// Outcome of a fetch, tagged with the generation it was issued under.
#[derive(Debug)]
pub enum Completion {
    Trending {
        generation: Generation,
        result: Result<TrendingCatalog, ApiError>,
    },
    /// Search and recommendation results both land in the session slot.
    Session {
        generation: Generation,
        result: Result<SearchResultSet, ApiError>,
    },
    Movie {
        generation: Generation,
        result: Result<MovieDetail, ApiError>,
    },
    Trailer {
        generation: Generation,
        result: Result<Option<String>, ApiError>,
    },
    /// The fetch task ended without reporting.
    Interrupted { slot: Slot, generation: Generation },
}

/// Owns every piece of UI state and is the only thing that changes it.
#[derive(Debug)]
pub struct Controller {
    view: ViewState,
    detail: DetailDisclosure,
    trailer: TrailerOverlay,
    catalog: Option<Arc<TrendingCatalog>>,
    trending_requests: Tracker,
    session_requests: Tracker,
    detail_requests: Tracker,
    trailer_requests: Tracker,
    error: Option<String>,
    notice: Option<String>,
    top_k: usize,
    trailer_embed_base: String,
}

impl Controller {
    pub fn new(config: &Config) -> Self {
        Self {
            view: ViewState::home(TrendingState::Pending),
            detail: DetailDisclosure::default(),
            trailer: TrailerOverlay::default(),
            catalog: None,
            trending_requests: Tracker::new(),
            session_requests: Tracker::new(),
            detail_requests: Tracker::new(),
            trailer_requests: Tracker::new(),
            error: None,
            notice: None,
            top_k: config.top_k,
            trailer_embed_base: config.trailer_embed_base.clone(),
        }
    }

    /// Kicks off the home page load.
    pub fn start(&mut self) -> Vec<Effect> {
        vec![Effect::FetchTrending {
            generation: self.trending_requests.begin(),
        }]
    }

    pub fn dispatch(&mut self, intent: Intent) -> Vec<Effect> {
        debug!("[Controller] intent {:?}", intent);
        match intent {
            Intent::SubmitQuery(text) => self.submit_query(&text),
            Intent::SelectGenre(genre) => self.select_genre(&genre),
            Intent::ReturnHome => self.return_home(),
            Intent::GoToPage(page) => self.go_to_page(page),
            Intent::NextPage => self.go_to_page(self.view.page() + 1),
            Intent::PrevPage => self.go_to_page(self.view.page().saturating_sub(1)),
            Intent::OpenMovie(id) => self.open_movie(id),
            Intent::ExpandDetail => {
                self.detail.expand();
                Vec::new()
            }
            Intent::CollapseDetail => {
                self.detail.collapse();
                Vec::new()
            }
            Intent::CloseDetail => self.close_detail(),
            Intent::RequestTrailer(id) => self.request_trailer(id),
            Intent::DismissTrailer => self.dismiss_trailer(),
            Intent::OpenTrailer => self.trailer.url().map(open_url).into_iter().collect(),
            Intent::OpenOffer(index) => self
                .detail
                .offer(index)
                .map(|offer| open_url(&offer.url))
                .into_iter()
                .collect(),
            Intent::ClearError => {
                self.error = None;
                Vec::new()
            }
            Intent::ClearNotice => {
                self.notice = None;
                Vec::new()
            }
        }
    }

    pub fn submit_query(&mut self, text: &str) -> Vec<Effect> {
        let query = match view::validate_query(text) {
            Ok(query) => query.to_string(),
            Err(e) => {
                self.error = Some(e.to_string());
                return Vec::new();
            }
        };

        self.error = None;
        let generation = self.session_requests.begin();
        info!("[Controller] search {} for {:?}", generation, query);
        self.view
            .enter_search(SessionSource::Query(query.clone()), generation);

        vec![
            Effect::FetchSearch {
                generation,
                query,
                top_k: self.top_k,
            },
            Effect::ScrollToTop,
        ]
    }

    pub fn select_genre(&mut self, genre: &str) -> Vec<Effect> {
        self.error = None;
        let generation = self.session_requests.begin();
        info!("[Controller] recommendations {} for {}", generation, genre);
        self.view
            .enter_search(SessionSource::Genre(genre.to_string()), generation);

        vec![
            Effect::FetchRecommendations {
                generation,
                genre: genre.to_string(),
            },
            Effect::ClearQueryInput,
            Effect::ScrollToTop,
        ]
    }

    pub fn return_home(&mut self) -> Vec<Effect> {
        self.session_requests.abandon();
        let mut effects = vec![Effect::ClearQueryInput, Effect::ScrollToTop];

        let trending = match &self.catalog {
            Some(catalog) => TrendingState::Loaded(Arc::clone(catalog)),
            None if self.trending_requests.is_in_flight() => TrendingState::Pending,
            None => {
                effects.push(Effect::FetchTrending {
                    generation: self.trending_requests.begin(),
                });
                TrendingState::Pending
            }
        };
        self.view.return_home(trending);
        effects
    }

    pub fn go_to_page(&mut self, page: usize) -> Vec<Effect> {
        match self.view.go_to_page(page) {
            Some(landed) => {
                debug!("[Controller] page {} (asked for {})", landed, page);
                vec![Effect::ScrollToTop]
            }
            None => Vec::new(),
        }
    }

    pub fn open_movie(&mut self, id: MovieId) -> Vec<Effect> {
        let generation = self.detail_requests.begin();
        vec![Effect::FetchMovie { generation, id }]
    }

    pub fn close_detail(&mut self) -> Vec<Effect> {
        self.detail.close();
        self.detail_requests.abandon();
        Vec::new()
    }

    pub fn request_trailer(&mut self, id: MovieId) -> Vec<Effect> {
        let generation = self.trailer_requests.begin();
        vec![Effect::FetchTrailer { generation, id }]
    }

    pub fn dismiss_trailer(&mut self) -> Vec<Effect> {
        self.trailer.dismiss();
        self.trailer_requests.abandon();
        Vec::new()
    }

    /// Shows an error raised outside the controller, such as a failed
    /// browser launch.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn complete(&mut self, completion: Completion) -> Vec<Effect> {
        match completion {
            Completion::Trending { generation, result } => {
                if !self.trending_requests.accept(generation) {
                    debug!("[Controller] dropping stale trending {}", generation);
                    return Vec::new();
                }
                match result {
                    Ok(catalog) => {
                        let catalog = Arc::new(catalog);
                        self.catalog = Some(Arc::clone(&catalog));
                        if let Some(trending) = self.view.trending_mut() {
                            *trending = TrendingState::Loaded(catalog);
                        }
                    }
                    Err(e) => {
                        warn!("[Controller] trending failed: {}", e);
                        self.fail_trending();
                    }
                }
            }
            Completion::Session { generation, result } => {
                if !self.session_requests.accept(generation) {
                    debug!("[Controller] dropping stale session {}", generation);
                    return Vec::new();
                }
                let Some(session) = self.view.session_mut() else {
                    return Vec::new();
                };
                match result {
                    Ok(set) => {
                        info!(
                            "[Controller] session {} got {} results",
                            generation,
                            set.results.len()
                        );
                        session.succeed(set);
                        self.view.go_to_page(1);
                    }
                    Err(e) => {
                        warn!("[Controller] session {} failed: {}", generation, e);
                        let fallback = match session.source {
                            SessionSource::Query(_) => SEARCH_FAILED,
                            SessionSource::Genre(_) => RECOMMENDATIONS_FAILED,
                        };
                        let message = e.user_message(fallback);
                        session.fail(message.clone());
                        self.error = Some(message);
                    }
                }
            }
            Completion::Movie { generation, result } => {
                if !self.detail_requests.accept(generation) {
                    debug!("[Controller] dropping stale detail {}", generation);
                    return Vec::new();
                }
                match result {
                    Ok(detail) => self.detail.show(detail),
                    Err(e) => {
                        warn!("[Controller] detail failed: {}", e);
                        self.error = Some(DETAILS_FAILED.to_string());
                    }
                }
            }
            Completion::Trailer { generation, result } => {
                if !self.trailer_requests.accept(generation) {
                    debug!("[Controller] dropping stale trailer {}", generation);
                    return Vec::new();
                }
                match result {
                    Ok(Some(key)) => self
                        .trailer
                        .show(trailer::embed_url(&self.trailer_embed_base, &key)),
                    Ok(None) => self.notice = Some(NO_TRAILER.to_string()),
                    Err(e) => {
                        warn!("[Controller] trailer failed: {}", e);
                        self.error = Some(TRAILER_FAILED.to_string());
                    }
                }
            }
            Completion::Interrupted { slot, generation } => {
                self.interrupt(slot, generation);
            }
        }
        Vec::new()
    }

    fn interrupt(&mut self, slot: Slot, generation: Generation) {
        let tracker = match slot {
            Slot::Trending => &mut self.trending_requests,
            Slot::Session => &mut self.session_requests,
            Slot::Detail => &mut self.detail_requests,
            Slot::Trailer => &mut self.trailer_requests,
        };
        if !tracker.accept(generation) {
            return;
        }
        warn!("[Controller] {:?} request {} interrupted", slot, generation);

        match slot {
            Slot::Trending => self.fail_trending(),
            Slot::Session => {
                if let Some(session) = self.view.session_mut() {
                    session.fail(INTERRUPTED);
                }
                self.error = Some(INTERRUPTED.to_string());
            }
            Slot::Detail => self.error = Some(DETAILS_FAILED.to_string()),
            Slot::Trailer => self.error = Some(TRAILER_FAILED.to_string()),
        }
    }

    fn fail_trending(&mut self) {
        if let Some(trending) = self.view.trending_mut() {
            *trending = TrendingState::Failed(TRENDING_FAILED.to_string());
        }
        self.error = Some(TRENDING_FAILED.to_string());
    }

    /// True while a search, detail or trailer fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.view.session().is_some_and(|s| s.is_loading())
            || self.detail_requests.is_in_flight()
            || self.trailer_requests.is_in_flight()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn detail(&self) -> &DetailDisclosure {
        &self.detail
    }

    pub fn trailer(&self) -> &TrailerOverlay {
        &self.trailer
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

fn open_url(url: &str) -> Effect {
    Effect::OpenUrl(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GenreShelf, MovieSummary, OfferKind, Rating, StreamingOffer};
    use crate::session::SessionStatus;

    fn controller() -> Controller {
        Controller::new(&Config::default())
    }

    fn movie(id: usize) -> MovieSummary {
        MovieSummary {
            id: MovieId::new(id.to_string()),
            title: format!("Movie {id}"),
            year: "2020".to_string(),
            genre: "Action, Drama".to_string(),
            rating: Rating::Score(6.5),
            plot: "Plot".to_string(),
            poster: None,
            score: Some(0.8),
        }
    }

    fn result_set(query: &str, count: usize) -> SearchResultSet {
        SearchResultSet {
            query: query.to_string(),
            results: (0..count).map(movie).collect(),
            search_type: None,
            search_time: Some(0.3),
        }
    }

    fn detail(trailer: Option<&str>) -> MovieDetail {
        MovieDetail {
            summary: movie(7),
            runtime: "99 min".to_string(),
            release_date: "2020-01-01".to_string(),
            director: "Director".to_string(),
            cast: "Cast".to_string(),
            production_companies: "Studio".to_string(),
            trailer_key: trailer.map(str::to_string),
            streaming: vec![StreamingOffer {
                name: "Netflix".to_string(),
                kind: OfferKind::Stream,
                url: "https://www.netflix.com".to_string(),
            }],
        }
    }

    fn catalog() -> TrendingCatalog {
        TrendingCatalog {
            shelves: vec![GenreShelf {
                genre: "action".to_string(),
                movies: vec![movie(1), movie(2)],
            }],
        }
    }

    fn http_error(message: Option<&str>) -> ApiError {
        ApiError::Status {
            status: 500,
            message: message.map(str::to_string),
        }
    }

    fn generation_of(effects: &[Effect]) -> Generation {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::FetchTrending { generation }
                | Effect::FetchSearch { generation, .. }
                | Effect::FetchRecommendations { generation, .. }
                | Effect::FetchMovie { generation, .. }
                | Effect::FetchTrailer { generation, .. } => Some(*generation),
                _ => None,
            })
            .expect("no fetch effect")
    }

    fn searched(c: &mut Controller, query: &str, count: usize) {
        let effects = c.submit_query(query);
        c.complete(Completion::Session {
            generation: generation_of(&effects),
            result: Ok(result_set(query, count)),
        });
    }

    #[test]
    fn test_starts_home_and_loads_trending() {
        let mut c = controller();
        assert!(c.view().is_home());

        let effects = c.start();
        c.complete(Completion::Trending {
            generation: generation_of(&effects),
            result: Ok(catalog()),
        });

        match c.view() {
            ViewState::Home {
                trending: TrendingState::Loaded(catalog),
            } => assert_eq!(catalog.shelves[0].genre, "action"),
            other => panic!("unexpected view {other:?}"),
        }
        assert!(!c.is_loading());
    }

    #[test]
    fn test_trending_failure_sets_home_error() {
        let mut c = controller();
        let effects = c.start();
        c.complete(Completion::Trending {
            generation: generation_of(&effects),
            result: Err(http_error(None)),
        });

        assert_eq!(
            c.view(),
            &ViewState::home(TrendingState::Failed(TRENDING_FAILED.to_string()))
        );
        assert_eq!(c.error(), Some(TRENDING_FAILED));
    }

    #[test]
    fn test_blank_query_is_rejected_locally() {
        let mut c = controller();
        let effects = c.submit_query("   \t");

        assert!(effects.is_empty());
        assert_eq!(c.error(), Some("Please enter a search query"));
        assert!(c.view().is_home());
        assert!(!c.is_loading());
    }

    #[test]
    fn test_submit_enters_loading_search() {
        let mut c = controller();
        c.report_error("old error");
        let effects = c.submit_query("  space opera ");

        assert_eq!(c.error(), None);
        assert!(c.is_loading());
        assert_eq!(c.view().page(), 1);
        assert!(matches!(
            &effects[0],
            Effect::FetchSearch { query, top_k: 80, .. } if query == "space opera"
        ));
        assert!(effects.contains(&Effect::ScrollToTop));
    }

    #[test]
    fn test_same_query_fetches_again() {
        let mut c = controller();
        let first = generation_of(&c.submit_query("noir"));
        let second = generation_of(&c.submit_query("noir"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_out_of_order_completions_keep_latest() {
        let mut c = controller();
        let old = generation_of(&c.submit_query("old"));
        let new = generation_of(&c.submit_query("new"));

        c.complete(Completion::Session {
            generation: new,
            result: Ok(result_set("new", 3)),
        });
        c.complete(Completion::Session {
            generation: old,
            result: Ok(result_set("old", 30)),
        });

        let session = c.view().session().unwrap();
        assert_eq!(session.description(), "new");
        assert_eq!(session.results().unwrap().results.len(), 3);
        assert!(!c.is_loading());
    }

    #[test]
    fn test_stale_completion_does_not_end_loading() {
        let mut c = controller();
        let old = generation_of(&c.submit_query("old"));
        c.submit_query("new");

        c.complete(Completion::Session {
            generation: old,
            result: Err(http_error(Some("boom"))),
        });

        assert!(c.is_loading());
        assert_eq!(c.error(), None);
    }

    #[test]
    fn test_search_error_uses_server_message() {
        let mut c = controller();
        let effects = c.submit_query("x");
        c.complete(Completion::Session {
            generation: generation_of(&effects),
            result: Err(http_error(Some("Empty query"))),
        });

        assert_eq!(c.error(), Some("Empty query"));
        assert!(!c.is_loading());
        assert_eq!(
            c.view().session().unwrap().status,
            SessionStatus::Error("Empty query".to_string())
        );
    }

    #[test]
    fn test_search_error_falls_back_to_generic() {
        let mut c = controller();
        let effects = c.submit_query("x");
        c.complete(Completion::Session {
            generation: generation_of(&effects),
            result: Err(http_error(None)),
        });
        assert_eq!(c.error(), Some(SEARCH_FAILED));
        assert!(!c.view().is_home());
    }

    #[test]
    fn test_select_genre_synthesizes_session() {
        let mut c = controller();
        let effects = c.select_genre("comedy");

        assert!(effects.contains(&Effect::ClearQueryInput));
        assert!(matches!(
            &effects[0],
            Effect::FetchRecommendations { genre, .. } if genre == "comedy"
        ));
        assert_eq!(
            c.view().session().unwrap().description(),
            "comedy recommendations"
        );

        c.complete(Completion::Session {
            generation: generation_of(&effects),
            result: Err(http_error(None)),
        });
        assert_eq!(c.error(), Some(RECOMMENDATIONS_FAILED));
    }

    #[test]
    fn test_pagination_clamps_and_scrolls() {
        let mut c = controller();
        searched(&mut c, "big", 30);

        assert_eq!(c.go_to_page(2), vec![Effect::ScrollToTop]);
        assert_eq!(c.view().page(), 2);

        c.go_to_page(99);
        assert_eq!(c.view().page(), 3);
        c.dispatch(Intent::NextPage);
        assert_eq!(c.view().page(), 3);
        c.dispatch(Intent::PrevPage);
        assert_eq!(c.view().page(), 2);
        c.go_to_page(0);
        assert_eq!(c.view().page(), 1);
    }

    #[test]
    fn test_go_to_page_at_home_is_ignored() {
        let mut c = controller();
        assert!(c.go_to_page(3).is_empty());
        assert!(c.view().is_home());
    }

    #[test]
    fn test_return_home_resets_page_and_query() {
        let mut c = controller();
        let effects = c.start();
        c.complete(Completion::Trending {
            generation: generation_of(&effects),
            result: Ok(catalog()),
        });
        searched(&mut c, "big", 40);
        c.go_to_page(3);

        let effects = c.return_home();
        assert!(effects.contains(&Effect::ClearQueryInput));
        assert!(effects.contains(&Effect::ScrollToTop));
        assert!(!effects.iter().any(|e| matches!(e, Effect::FetchTrending { .. })));
        assert!(c.view().is_home());
        assert_eq!(c.view().page(), 1);
        assert!(matches!(
            c.view(),
            ViewState::Home {
                trending: TrendingState::Loaded(_)
            }
        ));
    }

    #[test]
    fn test_return_home_ignores_inflight_search() {
        let mut c = controller();
        let effects = c.submit_query("slow");
        c.return_home();
        assert!(!c.is_loading());

        c.complete(Completion::Session {
            generation: generation_of(&effects),
            result: Ok(result_set("slow", 5)),
        });
        assert!(c.view().is_home());
    }

    #[test]
    fn test_return_home_retries_failed_trending() {
        let mut c = controller();
        let effects = c.start();
        c.complete(Completion::Trending {
            generation: generation_of(&effects),
            result: Err(http_error(None)),
        });
        c.submit_query("x");

        let effects = c.return_home();
        let generation = generation_of(&effects);
        assert_eq!(c.view(), &ViewState::home(TrendingState::Pending));

        c.complete(Completion::Trending {
            generation,
            result: Ok(catalog()),
        });
        assert!(matches!(
            c.view(),
            ViewState::Home {
                trending: TrendingState::Loaded(_)
            }
        ));
    }

    #[test]
    fn test_trending_arriving_during_search_is_cached() {
        let mut c = controller();
        let effects = c.start();
        c.submit_query("early");
        c.complete(Completion::Trending {
            generation: generation_of(&effects),
            result: Ok(catalog()),
        });
        assert!(!c.view().is_home());

        let effects = c.return_home();
        assert!(!effects.iter().any(|e| matches!(e, Effect::FetchTrending { .. })));
        assert!(matches!(
            c.view(),
            ViewState::Home {
                trending: TrendingState::Loaded(_)
            }
        ));
    }

    #[test]
    fn test_detail_open_expand_close() {
        let mut c = controller();
        let effects = c.open_movie(MovieId::new("7"));
        assert!(c.is_loading());

        c.complete(Completion::Movie {
            generation: generation_of(&effects),
            result: Ok(detail(None)),
        });
        assert!(matches!(c.detail(), DetailDisclosure::Basic(_)));
        assert!(!c.is_loading());

        let effects = c.dispatch(Intent::ExpandDetail);
        assert!(effects.is_empty());
        assert!(c.detail().is_extended());

        c.dispatch(Intent::CloseDetail);
        assert_eq!(c.detail(), &DetailDisclosure::Closed);
    }

    #[test]
    fn test_detail_failure_stays_closed() {
        let mut c = controller();
        let effects = c.open_movie(MovieId::new("7"));
        c.complete(Completion::Movie {
            generation: generation_of(&effects),
            result: Err(http_error(Some("Movie not found"))),
        });

        assert_eq!(c.detail(), &DetailDisclosure::Closed);
        assert_eq!(c.error(), Some(DETAILS_FAILED));
    }

    #[test]
    fn test_detail_response_after_close_is_dropped() {
        let mut c = controller();
        let first = c.open_movie(MovieId::new("1"));
        c.complete(Completion::Movie {
            generation: generation_of(&first),
            result: Ok(detail(None)),
        });
        let second = c.open_movie(MovieId::new("2"));
        c.close_detail();

        c.complete(Completion::Movie {
            generation: generation_of(&second),
            result: Ok(detail(None)),
        });
        assert!(!c.detail().is_open());
        assert!(!c.is_loading());
    }

    #[test]
    fn test_rapid_opens_each_fetch_and_latest_wins() {
        let mut c = controller();
        let first = generation_of(&c.open_movie(MovieId::new("1")));
        let second = generation_of(&c.open_movie(MovieId::new("2")));
        assert_ne!(first, second);

        let mut latest = detail(None);
        latest.summary.title = "Latest".to_string();
        c.complete(Completion::Movie {
            generation: second,
            result: Ok(latest),
        });
        c.complete(Completion::Movie {
            generation: first,
            result: Ok(detail(None)),
        });
        assert_eq!(c.detail().detail().unwrap().summary.title, "Latest");
    }

    #[test]
    fn test_open_offer_emits_url() {
        let mut c = controller();
        assert!(c.dispatch(Intent::OpenOffer(0)).is_empty());

        let effects = c.open_movie(MovieId::new("7"));
        c.complete(Completion::Movie {
            generation: generation_of(&effects),
            result: Ok(detail(None)),
        });
        assert_eq!(
            c.dispatch(Intent::OpenOffer(0)),
            vec![Effect::OpenUrl("https://www.netflix.com".to_string())]
        );
        assert!(c.dispatch(Intent::OpenOffer(5)).is_empty());
    }

    #[test]
    fn test_trailer_shows_over_detail() {
        let mut c = controller();
        let effects = c.open_movie(MovieId::new("7"));
        c.complete(Completion::Movie {
            generation: generation_of(&effects),
            result: Ok(detail(Some("k3y"))),
        });

        let effects = c.request_trailer(MovieId::new("7"));
        c.complete(Completion::Trailer {
            generation: generation_of(&effects),
            result: Ok(Some("k3y".to_string())),
        });

        assert_eq!(c.trailer().url(), Some("https://www.youtube.com/embed/k3y"));
        assert!(c.detail().is_open());
        assert_eq!(
            c.dispatch(Intent::OpenTrailer),
            vec![Effect::OpenUrl("https://www.youtube.com/embed/k3y".to_string())]
        );

        c.dispatch(Intent::DismissTrailer);
        assert_eq!(c.trailer(), &TrailerOverlay::Hidden);
        assert!(c.detail().is_open());
    }

    #[test]
    fn test_missing_trailer_is_a_notice() {
        let mut c = controller();
        let effects = c.request_trailer(MovieId::new("7"));
        c.complete(Completion::Trailer {
            generation: generation_of(&effects),
            result: Ok(None),
        });

        assert_eq!(c.trailer(), &TrailerOverlay::Hidden);
        assert_eq!(c.notice(), Some(NO_TRAILER));
        assert_eq!(c.error(), None);

        c.dispatch(Intent::ClearNotice);
        assert_eq!(c.notice(), None);
    }

    #[test]
    fn test_trailer_failure_is_an_error() {
        let mut c = controller();
        let effects = c.request_trailer(MovieId::new("7"));
        c.complete(Completion::Trailer {
            generation: generation_of(&effects),
            result: Err(http_error(None)),
        });
        assert_eq!(c.error(), Some(TRAILER_FAILED));
        c.dispatch(Intent::ClearError);
        assert_eq!(c.error(), None);
    }

    #[test]
    fn test_trailer_response_after_dismiss_is_dropped() {
        let mut c = controller();
        let effects = c.request_trailer(MovieId::new("7"));
        assert!(c.is_loading());
        c.dismiss_trailer();
        assert!(!c.is_loading());

        c.complete(Completion::Trailer {
            generation: generation_of(&effects),
            result: Ok(Some("late".to_string())),
        });
        assert!(!c.trailer().is_showing());
        assert_eq!(c.notice(), None);
        assert_eq!(c.error(), None);
    }

    #[test]
    fn test_genre_and_query_share_the_session_slot() {
        let mut c = controller();
        let genre = generation_of(&c.select_genre("comedy"));
        let query = generation_of(&c.submit_query("heist"));

        c.complete(Completion::Session {
            generation: query,
            result: Ok(result_set("heist", 3)),
        });
        c.complete(Completion::Session {
            generation: genre,
            result: Ok(SearchResultSet::recommendations("comedy", (0..5).map(movie).collect())),
        });
        let session = c.view().session().unwrap();
        assert_eq!(session.source, SessionSource::Query("heist".to_string()));
        assert_eq!(session.results().unwrap().results.len(), 3);

        let query = generation_of(&c.submit_query("noir"));
        let genre = generation_of(&c.select_genre("drama"));
        c.complete(Completion::Session {
            generation: genre,
            result: Ok(SearchResultSet::recommendations("drama", (0..5).map(movie).collect())),
        });
        c.complete(Completion::Session {
            generation: query,
            result: Err(http_error(Some("late failure"))),
        });
        let session = c.view().session().unwrap();
        assert_eq!(session.source, SessionSource::Genre("drama".to_string()));
        assert_eq!(session.description(), "drama recommendations");
        assert_eq!(session.results().unwrap().results.len(), 5);
        assert_eq!(c.error(), None);
        assert!(!c.is_loading());
    }

    #[test]
    fn test_interrupted_session_clears_loading() {
        let mut c = controller();
        let effects = c.submit_query("x");
        c.complete(Completion::Interrupted {
            slot: Slot::Session,
            generation: generation_of(&effects),
        });

        assert!(!c.is_loading());
        assert_eq!(c.error(), Some(INTERRUPTED));
    }

    #[test]
    fn test_interrupted_stale_request_is_ignored() {
        let mut c = controller();
        let old = generation_of(&c.open_movie(MovieId::new("1")));
        c.open_movie(MovieId::new("2"));

        c.complete(Completion::Interrupted {
            slot: Slot::Detail,
            generation: old,
        });
        assert!(c.is_loading());
        assert_eq!(c.error(), None);
    }
}

use tracing::{debug, info, warn};
use watchlist_models::{Candidate, MovieEntry};
use watchlist_sources::LookupError;
use crate::drag::{DragReorderEngine, DropOutcome, HoverTarget};
use crate::search::{SearchMessage, SearchRequest, SearchState};
use crate::subscription::{PressHub, PressTarget};
use crate::watchlist::{Watchlist, WatchlistError};

/// Keys the search input reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other,
}

/// One user input, as delivered by the render layer
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    QueryChanged(String),
    KeyUp(Key),
    SearchClicked,
    CandidateSelected(String),
    /// Primary pointer press anywhere on the page
    PointerPressed(PressTarget),
    DragStarted { id: String, y: f64 },
    DragOver { target: HoverTarget, y: f64 },
    /// Drag-over on a surface that is not a drop target
    PointerMoved { y: f64 },
    Dropped(HoverTarget),
    DragEnded,
}

/// Network work requested by a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SearchByTitle(SearchRequest),
    FetchDetail { id: String },
}

/// A finished lookup, fed back into the app
#[derive(Debug)]
pub enum Completion {
    Search {
        generation: u64,
        result: Result<Vec<Candidate>, LookupError>,
    },
    Detail {
        id: String,
        result: Result<MovieEntry, LookupError>,
    },
}

/// What applying a completion changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    ResultsUpdated,
    StaleResultsIgnored,
    Appended { id: String, index: usize },
    AppendSkipped { id: String, reason: String },
}

/// Search, watchlist and drag state behind one event entry point.
///
/// Every method runs to completion; lookups are handed out as [`Effect`]s
/// and come back as [`Completion`]s.
pub struct App {
    search: SearchState,
    watchlist: Watchlist,
    drag: DragReorderEngine,
    presses: PressHub<SearchMessage>,
}

impl App {
    pub fn new() -> Self {
        let presses = PressHub::new();
        let mut search = SearchState::new();
        search.mount(&presses);

        Self {
            search,
            watchlist: Watchlist::new(),
            drag: DragReorderEngine::new(),
            presses,
        }
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchState {
        &mut self.search
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn drag(&self) -> &DragReorderEngine {
        &self.drag
    }

    pub fn presses(&self) -> &PressHub<SearchMessage> {
        &self.presses
    }

    pub fn handle(&mut self, event: UserEvent) -> Vec<Effect> {
        debug!("App: {:?}", event);
        match event {
            UserEvent::QueryChanged(text) => {
                self.search.set_query(text);
                Vec::new()
            }
            UserEvent::KeyUp(Key::Enter) | UserEvent::SearchClicked => self.run_search(),
            UserEvent::KeyUp(Key::Escape) => {
                self.drag.end();
                Vec::new()
            }
            UserEvent::KeyUp(Key::Other) => Vec::new(),
            UserEvent::CandidateSelected(id) => {
                let id = self.search.select_candidate(&id);
                vec![Effect::FetchDetail { id }]
            }
            UserEvent::PointerPressed(target) => {
                for message in self.presses.dispatch(&target) {
                    match message {
                        SearchMessage::Dismiss => self.search.dismiss(),
                    }
                }
                Vec::new()
            }
            UserEvent::DragStarted { id, y } => {
                if let Err(e) = self.drag.start(&self.watchlist, &id, y) {
                    warn!("{}", e);
                }
                Vec::new()
            }
            UserEvent::DragOver { target, y } => {
                self.drag.drag_over(&self.watchlist, &target, y);
                Vec::new()
            }
            UserEvent::PointerMoved { y } => {
                self.drag.pointer_moved(y);
                Vec::new()
            }
            UserEvent::Dropped(target) => {
                if let DropOutcome::Committed { id, from, to } = self.drag.drop_on(&mut self.watchlist, &target) {
                    debug!("App: reorder committed for {} ({} -> {})", id, from, to);
                }
                Vec::new()
            }
            UserEvent::DragEnded => {
                self.drag.end();
                Vec::new()
            }
        }
    }

    fn run_search(&mut self) -> Vec<Effect> {
        match self.search.begin_search() {
            Some(request) => vec![Effect::SearchByTitle(request)],
            None => Vec::new(),
        }
    }

    pub fn complete(&mut self, completion: Completion) -> Outcome {
        match completion {
            Completion::Search { generation, result } => {
                if self.search.apply_results(generation, result) {
                    Outcome::ResultsUpdated
                } else {
                    Outcome::StaleResultsIgnored
                }
            }
            Completion::Detail { id, result } => match result {
                Ok(movie) => match self.watchlist.append(movie) {
                    Ok(index) => Outcome::Appended { id, index },
                    Err(e @ WatchlistError::Duplicate(_)) => {
                        info!("Not adding {}: {}", id, e);
                        Outcome::AppendSkipped { id, reason: e.to_string() }
                    }
                    Err(e) => Outcome::AppendSkipped { id, reason: e.to_string() },
                },
                Err(e) => {
                    warn!("Could not fetch details for {}: {}", id, e);
                    Outcome::AppendSkipped { id, reason: e.to_string() }
                }
            },
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchResults;
    use crate::watchlist::tests::movie;

    fn app_with(ids: &[&str]) -> App {
        let mut app = App::new();
        for id in ids {
            app.complete(Completion::Detail { id: id.to_string(), result: Ok(movie(id)) });
        }
        app
    }

    #[test]
    fn test_enter_and_button_start_search() {
        let mut app = App::new();
        assert!(app.handle(UserEvent::QueryChanged("Inception".to_string())).is_empty());

        let effects = app.handle(UserEvent::KeyUp(Key::Enter));
        assert_eq!(effects.len(), 1);
        let Effect::SearchByTitle(first) = &effects[0] else {
            panic!("expected a search effect");
        };
        assert_eq!(first.query, "Inception");

        let effects = app.handle(UserEvent::SearchClicked);
        assert!(matches!(&effects[0], Effect::SearchByTitle(r) if r.generation == first.generation + 1));

        assert!(app.handle(UserEvent::KeyUp(Key::Other)).is_empty());
    }

    #[test]
    fn test_typing_during_search_discards_old_results() {
        let mut app = App::new();
        app.handle(UserEvent::QueryChanged("Alien".to_string()));
        let Effect::SearchByTitle(request) = app.handle(UserEvent::SearchClicked).remove(0) else {
            panic!("expected a search effect");
        };
        app.handle(UserEvent::QueryChanged("Matrix".to_string()));

        let outcome = app.complete(Completion::Search {
            generation: request.generation,
            result: Ok(vec![Candidate::new("tt0078748", "Alien", "1979")]),
        });
        assert_eq!(outcome, Outcome::StaleResultsIgnored);
        assert!(app.search().candidates().is_empty());
    }

    #[test]
    fn test_select_candidate_requests_detail() {
        let mut app = App::new();
        app.handle(UserEvent::QueryChanged("Inception".to_string()));
        let effects = app.handle(UserEvent::CandidateSelected("tt1375666".to_string()));
        assert_eq!(effects, vec![Effect::FetchDetail { id: "tt1375666".to_string() }]);
        assert_eq!(app.search().query(), "");
    }

    #[test]
    fn test_click_away_dismisses_search() {
        let mut app = App::new();
        app.handle(UserEvent::QueryChanged("Alien".to_string()));
        let Effect::SearchByTitle(request) = app.handle(UserEvent::SearchClicked).remove(0) else {
            panic!("expected a search effect");
        };
        app.complete(Completion::Search {
            generation: request.generation,
            result: Ok(vec![Candidate::new("tt0078748", "Alien", "1979")]),
        });

        app.handle(UserEvent::PointerPressed(PressTarget::SearchResults));
        assert_eq!(app.search().candidates().len(), 1);

        app.handle(UserEvent::PointerPressed(PressTarget::Elsewhere));
        assert_eq!(app.search().query(), "");
        assert_eq!(app.search().results(), &SearchResults::Hidden);
    }

    #[test]
    fn test_unmounted_search_ignores_presses() {
        let mut app = App::new();
        app.handle(UserEvent::QueryChanged("Alien".to_string()));
        app.search_mut().unmount();
        app.handle(UserEvent::PointerPressed(PressTarget::Elsewhere));
        assert_eq!(app.search().query(), "Alien");
    }

    #[test]
    fn test_duplicate_detail_is_skipped() {
        let mut app = app_with(&["A"]);
        let outcome = app.complete(Completion::Detail { id: "A".to_string(), result: Ok(movie("A")) });
        assert!(matches!(outcome, Outcome::AppendSkipped { .. }));
        assert_eq!(app.watchlist().len(), 1);
    }

    #[test]
    fn test_failed_detail_does_not_append() {
        let mut app = App::new();
        let outcome = app.complete(Completion::Detail {
            id: "tt0".to_string(),
            result: Err(LookupError::NotFound("Incorrect IMDb ID.".to_string())),
        });
        assert!(matches!(outcome, Outcome::AppendSkipped { .. }));
        assert!(app.watchlist().is_empty());
    }

    #[test]
    fn test_drag_events_reorder() {
        let mut app = app_with(&["A", "B", "C"]);
        app.handle(UserEvent::DragStarted { id: "A".to_string(), y: 0.0 });
        app.handle(UserEvent::DragOver { target: HoverTarget::Row("B".to_string()), y: 50.0 });
        app.handle(UserEvent::Dropped(HoverTarget::Placeholder));
        app.handle(UserEvent::DragEnded);
        assert_eq!(app.watchlist().ids(), vec!["B", "A", "C"]);
        assert!(!app.drag().is_dragging());
    }

    #[test]
    fn test_escape_cancels_drag() {
        let mut app = app_with(&["A", "B", "C"]);
        app.handle(UserEvent::DragStarted { id: "C".to_string(), y: 100.0 });
        app.handle(UserEvent::PointerMoved { y: 80.0 });
        app.handle(UserEvent::DragOver { target: HoverTarget::Row("A".to_string()), y: 10.0 });
        assert_eq!(app.drag().placeholder_slot(), Some(0));

        app.handle(UserEvent::KeyUp(Key::Escape));
        app.handle(UserEvent::Dropped(HoverTarget::Placeholder));
        assert_eq!(app.watchlist().ids(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_drag_unknown_entry_is_ignored() {
        let mut app = app_with(&["A"]);
        app.handle(UserEvent::DragStarted { id: "Z".to_string(), y: 0.0 });
        assert!(!app.drag().is_dragging());
    }
}

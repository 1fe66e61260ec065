use tracing::{debug, warn};
use watchlist_models::Candidate;
use watchlist_sources::LookupError;
use crate::subscription::{PressHub, PressTarget, Subscription};

/// Shown in place of the results list when a search produced nothing
pub const NO_MATCH_MESSAGE: &str = "No movie titles match your search. Please try something else.";

/// What the results list under the search box currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchResults {
    #[default]
    Hidden,
    /// The last search failed or matched nothing
    NoMatches,
    Matches(Vec<Candidate>),
}

impl SearchResults {
    pub fn candidates(&self) -> &[Candidate] {
        match self {
            SearchResults::Matches(candidates) => candidates,
            _ => &[],
        }
    }
}

/// Messages the search box asks its owner to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMessage {
    Dismiss,
}

/// A title lookup the owner should run. Its result must be handed back to
/// [`SearchState::apply_results`] with the same generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
}

#[derive(Default)]
pub struct SearchState {
    query: String,
    results: SearchResults,
    // Bumped whenever in-flight results stop being wanted
    generation: u64,
    subscription: Option<Subscription<SearchMessage>>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    pub fn candidates(&self) -> &[Candidate] {
        self.results.candidates()
    }

    /// Register click-away dismissal. Calling again replaces the previous
    /// subscription.
    pub fn mount(&mut self, hub: &PressHub<SearchMessage>) {
        self.subscription = Some(hub.subscribe(|target| match target {
            PressTarget::SearchInput | PressTarget::SearchButton | PressTarget::SearchResults => None,
            _ => Some(SearchMessage::Dismiss),
        }));
    }

    pub fn unmount(&mut self) {
        self.subscription = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Replace the query text. Empty text clears the results; any edit
    /// makes in-flight searches stale.
    pub fn set_query(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.query {
            return;
        }
        self.query = text;
        if self.query.trim().is_empty() {
            self.clear_results();
        } else {
            self.generation += 1;
        }
    }

    /// Start a search for the current query. Returns `None` for a blank query.
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        let query = self.query.trim();
        if query.is_empty() {
            self.clear_results();
            return None;
        }
        let query = query.to_string();
        self.generation += 1;
        debug!("Search #{}: '{}'", self.generation, query);
        Some(SearchRequest {
            generation: self.generation,
            query,
        })
    }

    /// Apply a finished title lookup. Returns false when the response was
    /// stale and ignored.
    pub fn apply_results(&mut self, generation: u64, result: Result<Vec<Candidate>, LookupError>) -> bool {
        if generation != self.generation {
            debug!("Search #{}: discarding stale response (current is #{})", generation, self.generation);
            return false;
        }

        self.results = match result {
            Ok(candidates) if !candidates.is_empty() => {
                debug!("Search #{}: {} candidates", generation, candidates.len());
                SearchResults::Matches(candidates)
            }
            Ok(_) => SearchResults::NoMatches,
            Err(e) if e.is_not_found() => {
                debug!("Search #{}: {}", generation, e);
                SearchResults::NoMatches
            }
            Err(e) => {
                warn!("Search #{} failed: {}", generation, e);
                SearchResults::NoMatches
            }
        };
        true
    }

    /// Take `id` as the chosen candidate: clears the query and results and
    /// returns the identifier to fetch in full.
    pub fn select_candidate(&mut self, id: &str) -> String {
        if !self.candidates().iter().any(|c| c.id == id) {
            debug!("Search: selected {} which is not among the current candidates", id);
        }
        self.dismiss();
        id.to_string()
    }

    /// Click-away: clear the query and the results
    pub fn dismiss(&mut self) {
        self.query.clear();
        self.clear_results();
    }

    fn clear_results(&mut self) {
        self.results = SearchResults::Hidden;
        self.generation += 1;
    }
}

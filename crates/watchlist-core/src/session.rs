use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use watchlist_sources::MovieLookup;
use crate::app::{App, Completion, Effect, Outcome, UserEvent};

/// Drives an [`App`] on the tokio runtime.
///
/// State lives on the caller's task; each lookup runs as a spawned task and
/// its result is applied only when the caller awaits the session, so state
/// transitions never interleave.
pub struct Session {
    app: App,
    lookup: Arc<dyn MovieLookup>,
    pending: JoinSet<Completion>,
}

impl Session {
    pub fn new(lookup: Arc<dyn MovieLookup>) -> Self {
        Self {
            app: App::new(),
            lookup,
            pending: JoinSet::new(),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Lookups started but not yet applied
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Apply one user event and start any lookups it asks for
    pub fn dispatch(&mut self, event: UserEvent) {
        for effect in self.app.handle(event) {
            self.spawn(effect);
        }
    }

    fn spawn(&mut self, effect: Effect) {
        let lookup = Arc::clone(&self.lookup);
        debug!("Session: spawning {:?} via {}", effect, lookup.provider_name());

        match effect {
            Effect::SearchByTitle(request) => {
                self.pending.spawn(async move {
                    let result = lookup.search_by_title(&request.query).await;
                    Completion::Search { generation: request.generation, result }
                });
            }
            Effect::FetchDetail { id } => {
                self.pending.spawn(async move {
                    let result = lookup.lookup_by_id(&id).await;
                    Completion::Detail { id, result }
                });
            }
        }
    }

    /// Wait for the next lookup to finish and apply it. Returns `None` when
    /// nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Outcome> {
        loop {
            match self.pending.join_next().await? {
                Ok(completion) => return Some(self.app.complete(completion)),
                Err(e) => warn!("Lookup task failed: {}", e),
            }
        }
    }

    /// Apply every in-flight lookup, in completion order
    pub async fn settle(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.next_completion().await {
            outcomes.push(outcome);
        }
        outcomes
    }
}

use async_trait::async_trait;
use watchlist_models::{Candidate, MovieEntry};
use crate::error::LookupError;

/// Remote movie database seen from the watchlist.
///
/// Implementations are shared across spawned lookup tasks, hence `Send + Sync`.
#[async_trait]
pub trait MovieLookup: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Title search. A service-side "no match" is reported as `LookupError::NotFound`.
    async fn search_by_title(&self, query: &str) -> Result<Vec<Candidate>, LookupError>;

    /// Full detail record for one identifier
    async fn lookup_by_id(&self, id: &str) -> Result<MovieEntry, LookupError>;
}

use thiserror::Error;
use tracing::{debug, info};
use watchlist_models::MovieEntry;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WatchlistError {
    #[error("{0} is already on the watchlist")]
    Duplicate(String),

    #[error("{0} is not on the watchlist")]
    NotFound(String),
}

/// Ordered list of saved movies. Order is exactly the display order.
///
/// The only mutations are append-at-end and reorder, so the set of
/// identifiers only ever grows and a reorder never changes the length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Watchlist {
    entries: Vec<MovieEntry>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MovieEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&MovieEntry> {
        self.entries.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    /// Add to the end. Returns the new entry's index.
    pub fn append(&mut self, movie: MovieEntry) -> Result<usize, WatchlistError> {
        if self.contains(&movie.id) {
            return Err(WatchlistError::Duplicate(movie.id));
        }
        info!("Watchlist: appended {} at position {}", movie.display_title(), self.entries.len());
        self.entries.push(movie);
        Ok(self.entries.len() - 1)
    }

    /// Move `id` to `new_index`, clamped into range. Returns the final index.
    pub fn reorder(&mut self, id: &str, new_index: usize) -> Result<usize, WatchlistError> {
        let from = self
            .position(id)
            .ok_or_else(|| WatchlistError::NotFound(id.to_string()))?;
        let to = new_index.min(self.entries.len() - 1);
        self.move_entry(from, to);
        Ok(to)
    }

    /// Remove at `from` and reinsert at `to`; both must be in range
    fn move_entry(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        let entry = self.entries.remove(from);
        debug!("Watchlist: moving {} from {} to {}", entry.id, from, to);
        self.entries.insert(to, entry);
    }
}

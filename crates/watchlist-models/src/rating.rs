use serde::{Deserialize, Serialize};

/// One rating reported by the lookup service, e.g. ("Rotten Tomatoes", "87%")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingEntry {
    pub source: String,
    pub value: String,
}

/// Fixed display slots for ratings. The service reports them in this order,
/// so slots are matched by position rather than by source label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RatingSlot {
    Imdb,           // "7.5/10"
    RottenTomatoes, // "87%"
    Metacritic,     // "74/100"
}

impl RatingSlot {
    pub const ALL: [RatingSlot; 3] = [RatingSlot::Imdb, RatingSlot::RottenTomatoes, RatingSlot::Metacritic];

    pub fn index(self) -> usize {
        match self {
            RatingSlot::Imdb => 0,
            RatingSlot::RottenTomatoes => 1,
            RatingSlot::Metacritic => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RatingSlot::Imdb => "IMDb",
            RatingSlot::RottenTomatoes => "Rotten Tomatoes",
            RatingSlot::Metacritic => "Metacritic",
        }
    }
}

use serde::{Deserialize, Serialize};
use crate::rating::{RatingEntry, RatingSlot};

/// Placeholder shown for a rating slot the lookup did not return
pub const MISSING_RATING: &str = "-";

/// Full detail record for a movie saved to the watchlist.
///
/// Entries are immutable once added; only their position in the watchlist changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieEntry {
    pub id: String, // IMDb identifier, unique within a watchlist
    pub title: String,
    pub year: String,
    pub rated: String, // Content rating ("PG-13", "R", "N/A", ...)
    pub runtime: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub director: String,
    pub actors: String,
    pub plot: String,
    #[serde(default)]
    pub language: String,
    pub poster: String,
    /// Ordered rating sources; display slots are positional
    #[serde(default)]
    pub ratings: Vec<RatingEntry>,
}

impl MovieEntry {
    /// "Title (Year)", as shown in rows and result lists
    pub fn display_title(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }

    /// Value for one of the fixed rating slots, or `-` when the source did not report it
    pub fn rating_value(&self, slot: RatingSlot) -> &str {
        self.ratings
            .get(slot.index())
            .map(|r| r.value.as_str())
            .unwrap_or(MISSING_RATING)
    }

    /// First character of the content rating, used to colour the advisory badge
    pub fn advisory_class(&self) -> Option<char> {
        self.rated.chars().next()
    }

    pub fn imdb_url(&self) -> String {
        format!("https://www.imdb.com/title/{}", self.id)
    }

    pub fn rotten_tomatoes_url(&self) -> String {
        format!("https://www.rottentomatoes.com/m/{}", slugify(&self.title, '_'))
    }

    pub fn metacritic_url(&self) -> String {
        format!("https://www.metacritic.com/movie/{}", slugify(&self.title, '-'))
    }

    /// External page for a rating slot
    pub fn rating_url(&self, slot: RatingSlot) -> String {
        match slot {
            RatingSlot::Imdb => self.imdb_url(),
            RatingSlot::RottenTomatoes => self.rotten_tomatoes_url(),
            RatingSlot::Metacritic => self.metacritic_url(),
        }
    }
}

/// Split a comma-separated genre field ("Action, Sci-Fi") into its parts
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .map(|g| g.to_string())
        .collect()
}

/// Lowercase the title and collapse every whitespace run into `sep`
fn slugify(title: &str, sep: char) -> String {
    title
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(&sep.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> MovieEntry {
        MovieEntry {
            id: "tt1375666".to_string(),
            title: "The Dark  Knight".to_string(),
            year: "2008".to_string(),
            rated: "PG-13".to_string(),
            runtime: "152 min".to_string(),
            genres: vec!["Action".to_string(), "Crime".to_string()],
            director: "Christopher Nolan".to_string(),
            actors: "Christian Bale".to_string(),
            plot: "Batman faces the Joker.".to_string(),
            language: "English".to_string(),
            poster: "https://example.com/poster.jpg".to_string(),
            ratings: vec![RatingEntry {
                source: "Internet Movie Database".to_string(),
                value: "9.0/10".to_string(),
            }],
        }
    }

    #[test]
    fn test_display_title() {
        assert_eq!(sample_entry().display_title(), "The Dark  Knight (2008)");
    }

    #[test]
    fn test_rating_value_falls_back_to_dash() {
        let entry = sample_entry();
        assert_eq!(entry.rating_value(RatingSlot::Imdb), "9.0/10");
        assert_eq!(entry.rating_value(RatingSlot::RottenTomatoes), "-");
        assert_eq!(entry.rating_value(RatingSlot::Metacritic), "-");
    }

    #[test]
    fn test_external_urls() {
        let entry = sample_entry();
        assert_eq!(entry.imdb_url(), "https://www.imdb.com/title/tt1375666");
        assert_eq!(entry.rotten_tomatoes_url(), "https://www.rottentomatoes.com/m/the_dark_knight");
        assert_eq!(entry.metacritic_url(), "https://www.metacritic.com/movie/the-dark-knight");
    }

    #[test]
    fn test_advisory_class() {
        assert_eq!(sample_entry().advisory_class(), Some('P'));
        let mut unrated = sample_entry();
        unrated.rated = String::new();
        assert_eq!(unrated.advisory_class(), None);
    }

    #[test]
    fn test_split_genres() {
        assert_eq!(split_genres("Action, Adventure, Sci-Fi"), vec!["Action", "Adventure", "Sci-Fi"]);
        assert!(split_genres("").is_empty());
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let json = r#"{
            "id": "tt0000001", "title": "Short", "year": "1900", "rated": "N/A",
            "runtime": "1 min", "director": "Someone", "actors": "Nobody",
            "plot": "N/A", "poster": "N/A"
        }"#;
        let entry: MovieEntry = serde_json::from_str(json).unwrap();
        assert!(entry.genres.is_empty());
        assert!(entry.ratings.is_empty());
        assert_eq!(entry.language, "");
    }
}

use serde::Deserialize;
use tracing::debug;
use watchlist_models::{split_genres, Candidate, MovieEntry, RatingEntry};
use crate::error::LookupError;

/// Envelope shared by every OMDb response
#[derive(Debug, Deserialize)]
struct OmdbEnvelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
}

#[derive(Debug, Deserialize)]
struct OmdbRating {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct OmdbMovie {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Rated", default)]
    rated: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Language", default)]
    language: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<OmdbRating>,
}

impl From<OmdbSearchItem> for Candidate {
    fn from(item: OmdbSearchItem) -> Self {
        Candidate {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
        }
    }
}

impl From<OmdbMovie> for MovieEntry {
    fn from(movie: OmdbMovie) -> Self {
        MovieEntry {
            id: movie.imdb_id,
            title: movie.title,
            year: movie.year,
            rated: movie.rated,
            runtime: movie.runtime,
            genres: split_genres(&movie.genre),
            director: movie.director,
            actors: movie.actors,
            plot: movie.plot,
            language: movie.language,
            poster: movie.poster,
            ratings: movie
                .ratings
                .into_iter()
                .map(|r| RatingEntry { source: r.source, value: r.value })
                .collect(),
        }
    }
}

/// Reject `"Response": "False"` bodies before decoding the payload
fn check_envelope(body: &str) -> Result<(), LookupError> {
    let envelope: OmdbEnvelope = serde_json::from_str(body)?;
    if envelope.response.eq_ignore_ascii_case("true") {
        return Ok(());
    }
    let message = envelope.error.unwrap_or_else(|| "no result".to_string());
    debug!("OMDb reported failure: {}", message);
    Err(LookupError::NotFound(message))
}

/// Decode a title search (`s=`) body
pub fn parse_search(body: &str) -> Result<Vec<Candidate>, LookupError> {
    check_envelope(body)?;
    let response: OmdbSearchResponse = serde_json::from_str(body)?;
    Ok(response.search.into_iter().map(Candidate::from).collect())
}

/// Decode an identifier lookup (`i=`) body
pub fn parse_detail(body: &str) -> Result<MovieEntry, LookupError> {
    check_envelope(body)?;
    let movie: OmdbMovie = serde_json::from_str(body)?;
    if movie.imdb_id.is_empty() {
        return Err(LookupError::Malformed("detail record has no imdbID".to_string()));
    }
    Ok(movie.into())
}

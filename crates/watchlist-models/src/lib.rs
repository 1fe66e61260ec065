pub mod candidate;
pub mod movie;
pub mod rating;

pub use candidate::Candidate;
pub use movie::{split_genres, MovieEntry, MISSING_RATING};
pub use rating::{RatingEntry, RatingSlot};

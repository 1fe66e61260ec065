pub mod traits;
pub mod omdb;
pub mod error;

pub use traits::MovieLookup;
pub use error::LookupError;
pub use omdb::OmdbClient;

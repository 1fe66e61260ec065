pub mod config;
pub mod paths;

pub use config::{Config, LoggingConfig, OmdbConfig, API_KEY_ENV, PLACEHOLDER_API_KEY};
pub use paths::{PathManager, base_path_override};

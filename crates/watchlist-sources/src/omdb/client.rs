use crate::error::LookupError;
use crate::omdb::api;
use crate::traits::MovieLookup;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use watchlist_config::OmdbConfig;
use watchlist_models::{Candidate, MovieEntry};

/// Which OMDb query mode a request uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Title,      // s=
    Identifier, // i=
}

impl QueryMode {
    fn param(self) -> &'static str {
        match self {
            QueryMode::Title => "s",
            QueryMode::Identifier => "i",
        }
    }
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    media_type: String,
}

impl OmdbClient {
    pub fn new(base_url: String, api_key: String, media_type: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("movie-watchlist/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
            api_key,
            media_type,
        })
    }

    pub fn from_config(config: &OmdbConfig) -> anyhow::Result<Self> {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.media_type.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Query pairs for one request, in the order they are sent
    fn query_params<'a>(&'a self, mode: QueryMode, value: &'a str) -> [(&'static str, &'a str); 3] {
        [
            ("apikey", self.api_key.as_str()),
            ("type", self.media_type.as_str()),
            (mode.param(), value),
        ]
    }

    async fn fetch(&self, mode: QueryMode, value: &str) -> Result<String, LookupError> {
        debug!("OMDb request: {:?} '{}'", mode, value);

        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query_params(mode, value))
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status { status: status.as_u16(), body });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl MovieLookup for OmdbClient {
    fn provider_name(&self) -> &str {
        "omdb"
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Candidate>, LookupError> {
        let body = self.fetch(QueryMode::Title, query).await?;
        let candidates = api::parse_search(&body)?;
        info!("OMDb search '{}' returned {} candidates", query, candidates.len());
        Ok(candidates)
    }

    async fn lookup_by_id(&self, id: &str) -> Result<MovieEntry, LookupError> {
        let body = self.fetch(QueryMode::Identifier, id).await?;
        let movie = api::parse_detail(&body)?;
        debug!("OMDb detail for {}: {}", id, movie.display_title());
        Ok(movie)
    }
}

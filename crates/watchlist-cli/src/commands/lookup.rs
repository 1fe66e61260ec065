use crate::output::Output;
use crate::render;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::warn;
use watchlist_config::Config;
use watchlist_core::NO_MATCH_MESSAGE;
use watchlist_sources::{MovieLookup, OmdbClient};

/// Build the OMDb client after checking the config is usable
pub fn client_from_config(config: &Config) -> Result<OmdbClient> {
    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;
    OmdbClient::from_config(&config.omdb).map_err(|e| eyre!("Failed to create OMDb client: {}", e))
}

/// One-shot title search. Any lookup failure is reported the same way as an
/// empty result.
pub async fn run_search(query: &str, config: &Config, output: &Output) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        output.warn("Nothing to search for");
        return Ok(());
    }

    let client = client_from_config(config)?;
    let candidates = match client.search_by_title(query).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!("Search for '{}' failed: {}", query, e);
            Vec::new()
        }
    };

    if candidates.is_empty() {
        output.warn(NO_MATCH_MESSAGE);
        return Ok(());
    }

    if output.is_human() {
        if !output.is_quiet() {
            println!("{}", render::candidate_table(&candidates));
        }
    } else {
        output.data("candidates", &candidates);
    }
    Ok(())
}

pub async fn run_show(id: &str, config: &Config, output: &Output) -> Result<()> {
    let client = client_from_config(config)?;
    let entry = client
        .lookup_by_id(id.trim())
        .await
        .map_err(|e| eyre!("Failed to fetch details for {}: {}", id, e))?;

    render::render_movie(&entry, output);
    Ok(())
}

use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;
use watchlist_config::{Config, API_KEY_ENV, PLACEHOLDER_API_KEY};

pub fn show_config(config: &Config, config_file: &Path, full: bool, output: &Output) -> Result<()> {
    let api_key = if full { config.omdb.api_key.clone() } else { mask_string(&config.omdb.api_key) };
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stderr>".to_string());

    if !output.is_human() {
        output.data("config", &json!({
            "config_file": config_file.display().to_string(),
            "exists": config_file.exists(),
            "omdb": {
                "base_url": config.omdb.base_url,
                "api_key": api_key,
                "media_type": config.omdb.media_type,
                "request_timeout_secs": config.omdb.request_timeout_secs,
            },
            "logging": {
                "level": config.logging.level,
                "json": config.logging.json,
                "file": log_file,
            },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {} (showing defaults)", config_file.display()));
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Config File").add_attribute(Attribute::Bold),
        Cell::new(config_file.display().to_string()),
    ]);
    table.add_row(vec![Cell::new("OMDb").fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.omdb.base_url)]);
    table.add_row(vec![
        Cell::new("API Key"),
        Cell::new(if config.is_api_key_configured() { api_key } else { "<not set>".red().to_string() }),
    ]);
    table.add_row(vec![Cell::new("Media Type"), Cell::new(&config.omdb.media_type)]);
    table.add_row(vec![Cell::new("Timeout"), Cell::new(format!("{}s", config.omdb.request_timeout_secs))]);
    table.add_row(vec![Cell::new("Logging").fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    table.add_row(vec![Cell::new("Level"), Cell::new(&config.logging.level)]);
    table.add_row(vec![Cell::new("JSON"), Cell::new(if config.logging.json { "✓" } else { "✗" })]);
    table.add_row(vec![Cell::new("File"), Cell::new(log_file)]);
    println!("{}", table);

    if std::env::var(API_KEY_ENV).is_ok() {
        output.info(format!("API key is overridden by {}", API_KEY_ENV));
    }
    Ok(())
}

/// Write changed values to the config file. An empty `api_key` means
/// "prompt for it".
pub fn set_config(config_file: &Path, api_key: Option<String>, base_url: Option<String>, output: &Output) -> Result<()> {
    if api_key.is_none() && base_url.is_none() {
        output.warn("Nothing to change. Use --api-key and/or --base-url");
        output.info("\nExample: watchlist config set --api-key");
        return Ok(());
    }

    // Start from the file alone so env overrides are never persisted
    let mut config = if config_file.exists() {
        Config::load_from_file(config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?
    } else {
        Config::default()
    };

    if let Some(key) = api_key {
        let key = if key.trim().is_empty() {
            rpassword::prompt_password("OMDb API key: ").map_err(|e| eyre!("Failed to read API key: {}", e))?
        } else {
            key
        };
        let key = key.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            return Err(eyre!("API key cannot be empty"));
        }
        config.omdb.api_key = key.to_string();
    }

    if let Some(url) = base_url {
        config.omdb.base_url = url.trim().to_string();
    }

    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;
    config
        .save_to_file(config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Configuration saved to {}", config_file.display()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() || s == PLACEHOLDER_API_KEY {
        return "<not set>".to_string();
    }
    let count = s.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let head: String = s.chars().take(2).collect();
    let tail: String = s.chars().skip(count - 2).collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string(PLACEHOLDER_API_KEY), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("a1b2c3d4"), "a1***d4");
        assert_eq!(mask_string("aé123"), "aé***23");
        assert_eq!(mask_string("ключ"), "****");
        assert_eq!(mask_string("12345é"), "12***5é");
    }

    #[test]
    fn test_set_config_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Json, true);

        set_config(&path, Some("a1b2c3d4".to_string()), Some("https://omdb.example/".to_string()), &output).unwrap();

        let saved = Config::load_from_file(&path).unwrap();
        assert_eq!(saved.omdb.api_key, "a1b2c3d4");
        assert_eq!(saved.omdb.base_url, "https://omdb.example/");
        assert_eq!(saved.omdb.media_type, "movie");
    }

    #[test]
    fn test_set_config_rejects_bad_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Json, true);

        let result = set_config(&path, Some("a1b2c3d4".to_string()), Some("omdb.example".to_string()), &output);
        assert!(result.is_err());
        assert!(!path.exists());
    }
}

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base directory override from `WATCHLIST_BASE_PATH`, if set
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("WATCHLIST_BASE_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("movie-watchlist");

        Ok(Self::with_base(base_dir))
    }

    /// Config file at the base, logs in a subdirectory
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            log_dir: base.join("logs"),
            config_dir: base,
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Where a configured `[logging] file` lives. Relative names are placed
    /// in the log directory.
    pub fn resolve_log_file(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.log_dir.join(file)
        }
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::with_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/movie-watchlist on Linux)
        Self::new().unwrap_or_else(|_| Self::with_base(PathBuf::from(".movie-watchlist")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_layout() {
        let paths = PathManager::with_base(PathBuf::from("/tmp/wl"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/wl/config.toml"));
        assert_eq!(paths.log_dir(), Path::new("/tmp/wl/logs"));
    }

    #[test]
    fn test_resolve_log_file() {
        let paths = PathManager::with_base(PathBuf::from("/tmp/wl"));
        assert_eq!(
            paths.resolve_log_file(Path::new("watchlist.log")),
            PathBuf::from("/tmp/wl/logs/watchlist.log")
        );
        assert_eq!(
            paths.resolve_log_file(Path::new("/var/log/watchlist.log")),
            PathBuf::from("/var/log/watchlist.log")
        );
    }
}

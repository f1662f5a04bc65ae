//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::store::DEFAULT_SEARCH_LIMIT;

/// Environment variable that forces debug logging when set to `true`.
pub const DEBUG_ENV: &str = "BEAR_NOTES_DEBUG";

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV: &str = "BEAR_NOTES_CONFIG";

/// Application configuration loaded from config file.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Bear database location
    pub database: Option<PathBuf>,

    /// Include text extracted from attachments in term search
    pub search_attachments: bool,

    /// Result limit when none is given
    pub default_limit: usize,

    /// Embed tags as an inline line at the top of new notes
    pub note_conventions: bool,

    /// Force debug logging
    pub debug: bool,

    /// Program that opens bear:// URLs
    pub launcher: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            search_attachments: true,
            default_limit: DEFAULT_SEARCH_LIMIT,
            note_conventions: false,
            debug: false,
            launcher: "open".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `BEAR_NOTES_CONFIG` or the default location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_path);
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/bear-notes/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bear-notes")
            .join("config.toml")
    }

    /// Whether debug logging is forced by config or by `BEAR_NOTES_DEBUG=true`.
    pub fn debug_enabled(&self, env_value: Option<&str>) -> bool {
        self.debug || env_value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    /// Limit to use when the caller didn't give one (or gave zero).
    pub fn limit(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|&n| n > 0)
            .unwrap_or(if self.default_limit > 0 {
                self.default_limit
            } else {
                DEFAULT_SEARCH_LIMIT
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_searches_attachments() {
        let config = Config::default();
        assert!(config.database.is_none());
        assert!(config.search_attachments);
        assert!(!config.note_conventions);
        assert_eq!(config.default_limit, 50);
        assert_eq!(config.launcher, "open");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database = \"/tmp/bear.sqlite\"\nnote_conventions = true\n")
            .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.database, Some(PathBuf::from("/tmp/bear.sqlite")));
        assert!(config.note_conventions);
        assert!(config.search_attachments);
        assert_eq!(config.default_limit, 50);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_limit = \"lots\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config file"));
    }

    #[test]
    fn debug_env_forces_debug() {
        let config = Config::default();
        assert!(config.debug_enabled(Some("true")));
        assert!(config.debug_enabled(Some("TRUE")));
        assert!(!config.debug_enabled(Some("1")));
        assert!(!config.debug_enabled(None));
    }

    #[test]
    fn limit_falls_back_to_default() {
        let config = Config {
            default_limit: 10,
            ..Config::default()
        };
        assert_eq!(config.limit(Some(3)), 3);
        assert_eq!(config.limit(Some(0)), 10);
        assert_eq!(config.limit(None), 10);
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("bear-notes/config.toml"));
    }
}

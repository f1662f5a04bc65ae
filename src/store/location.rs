//! Resolves where Bear's database lives.

use std::path::{Path, PathBuf};

use super::{StoreError, StoreResult};

/// Environment variable that overrides the database path.
pub const DB_PATH_ENV: &str = "BEAR_DB_PATH";

/// Database path relative to the user's home directory.
pub const DEFAULT_RELATIVE_PATH: &str =
    "Library/Group Containers/9K33E3U3T4.net.shinyfrog.bear/Application Data/database.sqlite";

/// Where the database is, and whether it was named explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Named by the user (CLI flag, environment or config). Not checked up
    /// front; a bad path surfaces as `StoreOpenFailed`.
    Override(PathBuf),
    /// Bear's default location under the home directory.
    Default(PathBuf),
}

impl StoreLocation {
    /// Picks the first override present, else the default under `home`.
    ///
    /// Blank overrides are ignored.
    pub fn resolve<'a>(
        overrides: impl IntoIterator<Item = Option<&'a Path>>,
        home: Option<&Path>,
    ) -> Self {
        if let Some(path) = overrides
            .into_iter()
            .flatten()
            .find(|p| !p.as_os_str().is_empty())
        {
            tracing::debug!(path = %path.display(), "using database path override");
            return Self::Override(path.to_path_buf());
        }

        let home = home.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        Self::Default(home.join(DEFAULT_RELATIVE_PATH))
    }

    /// Returns the database path.
    pub fn path(&self) -> &Path {
        match self {
            Self::Override(path) | Self::Default(path) => path,
        }
    }

    /// Checks that the default database exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::StoreNotFound` if this is the default location
    /// and nothing exists there.
    pub fn ensure_present(&self) -> StoreResult<&Path> {
        match self {
            Self::Override(path) => Ok(path),
            Self::Default(path) if path.exists() => Ok(path),
            Self::Default(path) => {
                tracing::error!(path = %path.display(), "Bear database not found");
                Err(StoreError::StoreNotFound { path: path.clone() })
            }
        }
    }
}

//! Connection management for BearStore.

use super::BearStore;
use crate::domain::TagPath;
use crate::store::{StoreError, StoreLocation, StoreResult};
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// SQL function `bear_tag_within(tag, raw_name)`: true when the stored tag name,
/// normalized like [`TagPath`], is `tag` or lies beneath it.
pub(crate) const TAG_WITHIN_FN: &str = "bear_tag_within";

impl BearStore {
    // ===========================================
    // Read-Only Connection
    // ===========================================

    /// Opens the database at `path` read-only.
    ///
    /// The file is never created; a missing or unreadable file fails with
    /// `StoreError::StoreOpenFailed`.
    pub fn open(path: &Path) -> StoreResult<Self> {
        tracing::info!(path = %path.display(), "opening Bear database");

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "failed to open Bear database");
            StoreError::StoreOpenFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;

        // Opening is lazy in SQLite; touch the schema so a file that is not a
        // database fails here rather than on the first query.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |_| Ok(()))
            .map_err(|source| StoreError::StoreOpenFailed {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!("Bear database opened");
        Self::from_connection(conn)
    }

    /// Wraps an existing connection and registers the SQL functions queries
    /// rely on. Used directly for fixtures.
    pub fn from_connection(conn: Connection) -> StoreResult<Self> {
        register_functions(&conn)?;
        Ok(Self {
            conn,
            search_attachments: true,
        })
    }

    /// Sets whether term search also looks at attachment text.
    pub fn search_attachments(mut self, enabled: bool) -> Self {
        self.search_attachments = enabled;
        self
    }

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Closes the handle, reporting any failure.
    pub fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_, e)| StoreError::Database(e))
    }
}

/// Tag names are folded in Rust rather than with SQLite's `lower()`, which
/// only handles ASCII.
fn register_functions(conn: &Connection) -> StoreResult<()> {
    conn.create_scalar_function(
        TAG_WITHIN_FN,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let tag = ctx.get::<Option<String>>(0)?;
            let stored = ctx.get::<Option<String>>(1)?;
            let tag = tag.as_deref().and_then(TagPath::new);
            let stored = stored.as_deref().and_then(TagPath::new);
            Ok(matches!((tag, stored), (Some(tag), Some(stored)) if tag.contains(&stored)))
        },
    )?;
    Ok(())
}

/// Runs one operation against a freshly opened handle and releases it.
///
/// The handle is closed on every exit path. A failure to close is logged and
/// never replaces the operation's own result.
///
/// The operation may return any error that a `StoreError` converts into, so
/// callers that layer their own failures on top can share the handle.
pub fn with_store<T, E>(
    location: &StoreLocation,
    search_attachments: bool,
    op: impl FnOnce(&BearStore) -> Result<T, E>,
) -> Result<T, E>
where
    E: From<StoreError>,
{
    let path = location.ensure_present()?;
    let store = BearStore::open(path)?.search_attachments(search_attachments);

    let result = op(&store);

    match store.close() {
        Ok(()) => tracing::debug!("Bear database closed"),
        Err(e) => tracing::warn!(error = %e, "failed to close Bear database"),
    }

    result
}

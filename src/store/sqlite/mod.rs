//! Read-only SQLite access to Bear's database.

mod connection;
mod repo_impl;


use rusqlite::Connection;

pub(crate) use connection::TAG_WITHIN_FN;
pub use connection::with_store;

// ===========================================
// BearStore Struct
// ===========================================

/// A read-only handle on Bear's database.
///
/// Handles are meant to live for a single operation: open, query, close.
pub struct BearStore {
    pub(crate) conn: Connection,
    pub(crate) search_attachments: bool,
}
